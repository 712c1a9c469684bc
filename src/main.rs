use clap::Parser;
use polymetronome::audio::{AudioBackend, CpalBackend, StreamBackend};
use polymetronome::cli::{Args, OutputMode};
use polymetronome::synth::Engine;

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.engine_config();
    let engine = Engine::new(&config)?;

    let mut backend: Box<dyn AudioBackend> = match args.output {
        OutputMode::Play => Box::new(CpalBackend::new(engine)),
        OutputMode::Stream => Box::new(StreamBackend::new(engine)),
    };
    backend.run()
}
