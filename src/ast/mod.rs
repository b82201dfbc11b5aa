pub mod expression;
pub mod node;
pub mod root;
