use crate::audio::AudioBackend;
use crate::synth::Engine;
use std::io::{self, BufWriter, Stdout, Write};

/// Samples rendered per write. Matches the buffer size a typical live
/// playback callback requests, so both adapters chunk the engine the same
/// way (not that it matters: the engine's output is chunk-independent).
const CHUNK_SAMPLES: usize = 1024;

/// Raw stream adapter: renders continuously and writes each sample to the
/// sink as 4 bytes, IEEE-754 single precision, little-endian. No header, no
/// framing; pipe it into sox/aplay or another process.
pub struct StreamBackend<W: Write> {
    engine: Engine,
    sink: W,
}

impl StreamBackend<BufWriter<Stdout>> {
    pub fn new(engine: Engine) -> Self {
        Self::with_sink(engine, BufWriter::new(io::stdout()))
    }
}

impl<W: Write> StreamBackend<W> {
    pub fn with_sink(engine: Engine, sink: W) -> Self {
        Self { engine, sink }
    }

    /// Renders one chunk into `buffer` and writes its binary encoding.
    fn write_chunk(&mut self, buffer: &mut [f32]) -> io::Result<()> {
        self.engine.render(buffer);
        for &sample in buffer.iter() {
            self.sink.write_all(&sample.to_le_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> AudioBackend for StreamBackend<W> {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut buffer = vec![0.0f32; CHUNK_SAMPLES];
        loop {
            if let Err(err) = self.write_chunk(&mut buffer) {
                // The reader went away; that is the normal way a stream run
                // ends, not a failure.
                if err.kind() == io::ErrorKind::BrokenPipe {
                    return Ok(());
                }
                return Err(err.into());
            }
        }
    }
}
