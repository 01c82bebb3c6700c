mod bounds;
mod evaluation;
mod generator;

pub use self::{
    bounds::{Bounds, Line},
    evaluation::Evaluation,
    generator::{GenerateError, Generator, GeneratorConfig, SyntheticCloud},
};
