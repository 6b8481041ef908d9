use std::path::Path;
use std::time::Duration;

use argh::FromArgs;
use catmatrix_core::app::{Application, LoopControl};
use catmatrix_core::config::Config;
use catmatrix_core::pipeline::Pipeline;
use catmatrix_core::source::{FetchError, ImageSource};
use log::{info, warn};

use crate::decoder::JpegDecoder;
use crate::file_source::FileSource;
use crate::http_source::HttpSource;
use crate::minifb_sink::MinifbSink;
use crate::platform::{HostMonitor, StdDelay};

mod decoder;
mod file_source;
mod http_source;
mod minifb_sink;
mod platform;

#[derive(FromArgs)]
/// Desktop simulator for the CatMatrix LED panel.
struct Args {
    /// image endpoint, e.g. http://cataas.com/cat (plain http only)
    #[argh(option)]
    url: Option<String>,

    /// directory of JPEG files to cycle through instead of fetching
    #[argh(option)]
    dir: Option<String>,

    /// channel brightness factor applied before quantization
    #[argh(option, default = "0.8")]
    brightness: f32,

    /// window magnification: 1, 2, 4, 8 or 16
    #[argh(option, default = "8")]
    scale: u32,

    /// fetch timeout in seconds
    #[argh(option, default = "10")]
    timeout: u64,

    /// show a single frame, then keep the window open
    #[argh(switch)]
    once: bool,
}

enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl ImageSource for Source {
    fn fetch(&mut self, width: usize, height: usize) -> Result<Vec<u8>, FetchError> {
        match self {
            Source::Http(source) => source.fetch(width, height),
            Source::File(source) => source.fetch(width, height),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let config = Config {
        brightness: args.brightness,
        ..Config::default()
    };
    let scale = match args.scale {
        1 => minifb::Scale::X1,
        2 => minifb::Scale::X2,
        4 => minifb::Scale::X4,
        16 => minifb::Scale::X16,
        _ => minifb::Scale::X8,
    };

    let source = match (&args.dir, &args.url) {
        (Some(dir), _) => Source::File(FileSource::new(Path::new(dir)).unwrap_or_else(|err| {
            panic!("Unable to read {}: {}", dir, err);
        })),
        (None, url) => {
            let url = url.as_deref().unwrap_or("http://cataas.com/cat");
            let timeout = Duration::from_secs(args.timeout);
            Source::Http(HttpSource::new(url, timeout).unwrap_or_else(|err| {
                panic!("Bad URL {}: {}", url, err);
            }))
        }
    };

    info!("catmatrix desktop simulator started");

    let mut sink = MinifbSink::new(config.width, config.height, scale);
    let pipeline = Pipeline::new(source, JpegDecoder, StdDelay, config);
    let mut app = Application::new(pipeline, StdDelay, HostMonitor, config);

    while sink.is_open() {
        match app.run_once(&mut sink) {
            LoopControl::Continue => {}
            LoopControl::Restart => {
                // The appliance's supervisor reloads the process here.
                warn!("platform requested restart, exiting");
                break;
            }
        }
        if args.once {
            while sink.is_open() {
                sink.idle();
            }
            break;
        }
    }
}
