mod cpal_backend;
mod stream_backend;

pub use self::cpal_backend::CpalBackend;
pub use self::stream_backend::StreamBackend;

/// An output adapter driving the engine. Both implementations pull samples
/// from the same core, so they produce bit-identical streams for identical
/// configuration; only the delivery mechanism differs.
pub trait AudioBackend {
    /// Runs until the host stops the process (live playback) or the sink is
    /// closed (streaming). Setup failures are reported here, before any
    /// audio has been produced.
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
