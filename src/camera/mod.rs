pub mod capture;

pub use capture::{CaptureSession, OpenCvCamera};
