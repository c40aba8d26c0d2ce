pub use self::{action::*, block::*, colour::*, path::*, unit_grid::*};

pub(crate) mod action;
pub(crate) mod block;
pub(crate) mod colour;
pub(crate) mod path;
pub(crate) mod unit_grid;
