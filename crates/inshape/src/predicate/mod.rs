mod ast;
mod eval;
mod fingerprint;

#[cfg(test)]
mod tests;

pub use ast::Predicate;
pub use fingerprint::ShapeSignature;
