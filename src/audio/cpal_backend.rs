use crate::audio::AudioBackend;
use crate::synth::Engine;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::sync::{Arc, Mutex};

/// Live playback adapter. The audio thread periodically pulls a buffer from
/// the engine through the callback; this struct holds the engine and the
/// stream, nothing else.
pub struct CpalBackend {
    engine: Arc<Mutex<Engine>>,
}

impl CpalBackend {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    fn select_output_device(host: &cpal::Host) -> Result<cpal::Device, Box<dyn std::error::Error>> {
        // On Linux the ALSA default is often a raw hardware device; prefer
        // the pipewire/default endpoints when they exist.
        if cfg!(target_os = "linux") {
            for device in host.output_devices()? {
                let name = device.name().unwrap_or_default().to_lowercase();
                if name.starts_with("default:") || name.contains("pipewire") {
                    return Ok(device);
                }
            }
        }
        host.default_output_device()
            .ok_or_else(|| "no output device available".into())
    }

    fn build_stream(&self) -> Result<Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = Self::select_output_device(&host)?;
        eprintln!("playing on: {}", device.name().unwrap_or_default());

        let supported_config = device.default_output_config()?;
        if supported_config.sample_format() != SampleFormat::F32 {
            return Err("unsupported sample format".into());
        }

        let sample_rate = self.engine.lock().unwrap().sample_rate();
        let mut stream_config: cpal::StreamConfig = supported_config.into();
        stream_config.sample_rate = cpal::SampleRate(sample_rate);

        let channels = stream_config.channels as usize;
        let engine = self.engine.clone();

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut engine = engine.lock().unwrap();
                let mut buffer = vec![0.0; data.len() / channels];
                engine.render(&mut buffer);

                // Duplicate the mono sample across the device's channels.
                for (frame, &sample) in data.chunks_mut(channels).zip(buffer.iter()) {
                    frame.fill(sample);
                }
            },
            |err| eprintln!("stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stream = self.build_stream()?;
        stream.play()?;

        // The audio thread does all the work from here; generation only ends
        // when the process is interrupted.
        loop {
            std::thread::park();
        }
    }
}
