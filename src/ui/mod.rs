//! Terminal dashboard: render model, layout, and widgets.
pub mod model;
pub mod render;

#[cfg(test)]
mod tests;
