mod apple;
mod audio;
mod clock;
mod conf;
mod error;
mod game;
mod grid;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;

use log::{error, info};
use simplelog::{Config, WriteLogger};

use crate::conf::{Conf, CONF_FILE};
use crate::error::GameResult;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    if let Err(e) = try_main() {
        error!("{}", e);
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn try_main() -> GameResult {
    let conf = Conf::load(CONF_FILE)?;

    // The terminal is the game's screen, so logs go to a file.
    WriteLogger::init(conf.log_level()?, Config::default(), File::create(&conf.log_file)?)?;
    info!("Starting snake, field {}x{}", conf.field.width, conf.field.height);

    // Assets are checked before the terminal is taken over so that a
    // missing file is reported on a normal screen.
    let audio = audio::open(&conf.assets)?;

    let mut term = term::TermManager::new(conf.field)?;
    term.setup()?;

    let mut game = game::SnakeGame::new(&conf, term, audio);
    let result = game.run();
    let restored = game.shutdown();

    info!("Bye");
    result.and(restored)
}
