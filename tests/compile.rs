use zcss::{compile, compile_with_options, ErrorKind, Options, SassOutputStyle};

fn kinds(input: &str) -> Vec<ErrorKind> {
    compile_with_options(input, &Options::default())
        .unwrap()
        .diagnostics
        .iter()
        .map(|d| d.kind)
        .collect()
}

#[test]
fn plain_css_is_unchanged_modulo_whitespace() {
    let input = "a,b   {color:red;margin : 0 auto}\n\nul > li{padding:2px}";
    let once = compile(input, "compact").unwrap();
    assert_eq!(once, "a, b { color: red; margin: 0 auto; }\n\nul > li { padding: 2px; }\n");
    assert_eq!(compile(&once, "compact").unwrap(), once);
}

#[test]
fn first_global_definition_wins() {
    assert_eq!(
        compile("$c: red; $c: blue; .a { color: $c }", "compact").unwrap(),
        ".a { color: red; }\n"
    );
}

#[test]
fn sibling_includes_do_not_share_bindings() {
    let input = "
        @mixin pad($p) { padding: $p; .inner { margin: $p } }
        .one { @include pad(1px); }
        .two { @include pad(2px); }
    ";
    assert_eq!(
        compile(input, "compact").unwrap(),
        ".one { padding: 1px; }\n\n.one .inner { margin: 1px; }\n\n\
         .two { padding: 2px; }\n\n.two .inner { margin: 2px; }\n"
    );
}

#[test]
fn nested_includes_get_their_own_frames() {
    let input = "
        @mixin inner($v) { inner: $v; }
        @mixin outer($v) { @include inner(2px); outer: $v; }
        a { @include outer(1px); }
    ";
    assert_eq!(compile(input, "compact").unwrap(), "a { inner: 2px; outer: 1px; }\n");
}

#[test]
fn nested_rules_flatten_without_empty_parents() {
    assert_eq!(compile(".a { .b { color: red } }", "compact").unwrap(), ".a .b { color: red; }\n");
    assert_eq!(
        compile(".a { .b { .c { x: y } } }", "compact").unwrap(),
        ".a .b .c { x: y; }\n"
    );
}

#[test]
fn arithmetic_on_variables() {
    assert_eq!(
        compile("$m: 16px; .x { padding: $m / 2 }", "compact").unwrap(),
        ".x { padding: 8px; }\n"
    );
}

#[test]
fn missing_mixin_contributes_nothing() {
    let input = ".x { color: red; @include ghost; }";
    assert_eq!(compile(input, "compact").unwrap(), ".x { color: red; }\n");
    assert_eq!(kinds(input), vec![ErrorKind::UnknownMixin]);
}

#[test]
fn unresolved_variable_is_passed_through() {
    let input = ".x { color: $missing }";
    assert_eq!(compile(input, "compact").unwrap(), ".x { color: $missing; }\n");
    assert_eq!(kinds(input), vec![ErrorKind::UnresolvedVariable]);
}

#[test]
fn duplicate_declarations_collapse_to_the_first() {
    assert_eq!(
        compile("a { color: red; margin: 0; color: red; }", "compact").unwrap(),
        "a { color: red; margin: 0; }\n"
    );
}

#[test]
fn mixin_arguments_shadow_globals_only_inside_the_mixin() {
    let input = "
        $pacman: magenta;
        @mixin left($dist, $pacman) {
            float: left;
            margin-left: $dist;
            color: $pacman;
        }
        @mixin table-base {
            th { text-align: center; font-weight: bold; }
            td, th { padding: 2px; }
        }
        #data {
            @include left(10px, #444);
            @include table-base;
        }
        .ghost { color: $pacman; }
    ";
    assert_eq!(
        compile(input, "compact").unwrap(),
        "#data { float: left; margin-left: 10px; color: #444; }\n\n\
         #data th { text-align: center; font-weight: bold; }\n\n\
         #data td, #data th { padding: 2px; }\n\n\
         .ghost { color: magenta; }\n"
    );
}

#[test]
fn media_blocks_wrap_their_rules() {
    let input = "$w: 100px; @media screen and (max-width: 600px) { .col { width: $w * 2 } }";
    assert_eq!(
        compile(input, "compact").unwrap(),
        "@media screen and (max-width: 600px) {\n.col { width: 200px; }\n}\n"
    );
    assert_eq!(
        compile(input, "expanded").unwrap(),
        "@media screen and (max-width: 600px) {\n  .col {\n    width: 200px;\n  }\n}\n"
    );
}

#[test]
fn imports_pass_through_in_place() {
    let input = "@charset \"UTF-8\";\n<!-- @import url(base.css); -->\na { b: c }";
    assert_eq!(
        compile(input, "compact").unwrap(),
        "@charset \"UTF-8\";\n\n@import url(base.css);\n\na { b: c; }\n"
    );
}

#[test]
fn comments_are_stripped() {
    assert_eq!(
        compile("/* header */ a { /* inline */ color: red; }", "compact").unwrap(),
        "a { color: red; }\n"
    );
}

#[test]
fn broken_items_are_skipped() {
    let input = "a { color: ; } @unknown x; b { color: blue }";
    let compiled = compile_with_options(input, &Options::default()).unwrap();
    assert_eq!(compiled.css, "b { color: blue; }\n");
    assert_eq!(compiled.diagnostics.len(), 2);
    assert!(compiled.diagnostics.iter().all(|d| d.kind == ErrorKind::SyntaxError));
}

#[test]
fn nesting_too_deep_is_fatal() {
    let options = Options { max_depth: 2, ..Options::default() };
    let err = compile_with_options("a { b { c { d: e } } }", &options).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep);

    let err = compile_with_options("@mixin m { @include m; } a { @include m; }", &options).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep);
}

#[test]
fn unterminated_comment_is_fatal() {
    assert_eq!(compile("a { b: c } /* oops", "compact").unwrap_err().kind, ErrorKind::TokenizerError);
}

#[test]
fn unknown_style_is_rejected() {
    assert_eq!(compile("a { b: c }", "nested").unwrap_err().kind, ErrorKind::InvalidOutputStyle);
}

#[test]
fn compressed_output() {
    let options = Options { style: SassOutputStyle::Compressed, ..Options::default() };
    let compiled = compile_with_options("a, b { color: red !important; margin: 0 } c { d: e }", &options).unwrap();
    assert_eq!(compiled.css, "a,b{color:red!important;margin:0}c{d:e}\n");
}

#[test]
fn empty_input_compiles_to_nothing() {
    assert_eq!(compile("", "compact").unwrap(), "");
    assert_eq!(compile("$only: variables;", "compact").unwrap(), "");
}

#[test]
fn non_ascii_input_compiles() {
    let input = ".café::before { content: \"→ é\"; }";
    assert_eq!(compile(input, "compact").unwrap(), ".café::before { content: \"→ é\"; }\n");
}

#[test]
fn non_ascii_after_a_bang_is_a_syntax_error() {
    let compiled = compile_with_options("a { b: c !ééééé } d { e: f }", &Options::default()).unwrap();
    assert_eq!(compiled.css, "d { e: f; }\n");
    assert_eq!(compiled.diagnostics.iter().map(|d| d.kind).collect::<Vec<_>>(), vec![ErrorKind::SyntaxError]);
}

#[test]
fn deeply_nested_values_are_fatal() {
    let parens = format!("a {{ b: {}1{} }}", "(".repeat(500), ")".repeat(500));
    assert_eq!(compile(&parens, "compact").unwrap_err().kind, ErrorKind::NestingTooDeep);

    let calls = format!("a {{ b: {}1{} }}", "f(".repeat(500), ")".repeat(500));
    assert_eq!(compile(&calls, "compact").unwrap_err().kind, ErrorKind::NestingTooDeep);
}

#[test]
fn literal_numbers_are_printed_as_written() {
    let input = "a { width: 1.1234567px; margin: .5em; z-index: 99999999999999999; }\n";
    assert_eq!(compile(input, "compact").unwrap(), input);
    assert_eq!(
        compile("$w: 1.1234567px; a { width: $w; height: $w * 1 }", "compact").unwrap(),
        "a { width: 1.1234567px; height: 1.12346px; }\n"
    );
}

#[test]
fn font_face_keeps_unicode_ranges() {
    let input = "@font-face { font-family: x; unicode-range: U+0000-00FF, U+0131; }";
    let compiled = compile_with_options(input, &Options::default()).unwrap();
    assert_eq!(compiled.css, "@font-face { font-family: x; unicode-range: U+0000-00FF, U+0131; }\n");
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn parent_references_inside_attribute_values_stay() {
    assert_eq!(
        compile(".p { &[data-x=\"a&b\"] { c: d } }", "compact").unwrap(),
        ".p[data-x=\"a&b\"] { c: d; }\n"
    );
}
