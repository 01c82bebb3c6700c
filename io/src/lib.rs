mod frame;
pub mod pipeline;
mod report;
mod source;

pub use self::{
    frame::Frame,
    report::ReportWriter,
    source::{FileSource, FrameReader, PointSource, ResultSink},
};
