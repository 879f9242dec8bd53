use macroquad::miniquad::conf::Platform;
use macroquad::prelude::*;
use simplelog::{LevelFilter, SimpleLogger};

mod config;
mod error;
mod game;
mod input;
mod render;

use config::GameConfig;
use error::StartupError;
use game::{Game, State};
use input::Command;
use render::Renderer;

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: config.title.clone(),
        window_width: config.width,
        window_height: config.height,
        window_resizable: false,
        platform: Platform {
            swap_interval: Some(1), // vsync
            ..Default::default()
        },
        ..Default::default()
    }
}

async fn run(config: GameConfig) -> Result<(), StartupError> {
    let renderer = Renderer::load(&config.sprite_path, config.cell_size).await?;
    let mut game = Game::new(
        config.bounds(),
        config.start(),
        config.start_direction,
        config.start_size,
    );
    let tick = config.tick().as_secs_f64();
    let mut last_tick = get_time();

    loop {
        for command in input::poll() {
            match command {
                Command::Quit => {
                    log::info!("escape pressed, closing");
                    return Ok(());
                }
                Command::Steer(dir) => game.steer(dir),
            }
        }

        let now = get_time();
        if game.state() == State::Alive && now - last_tick >= tick {
            last_tick = now;
            game.tick();
        }

        renderer.draw(&game);
        next_frame().await;
    }
}

fn main() {
    let config = GameConfig::load();

    let level = config.as_ref().map(GameConfig::level_filter).unwrap_or(LevelFilter::Info);
    if let Err(err) = SimpleLogger::init(level, simplelog::Config::default()) {
        eprintln!("failed to initialize logger: {err}");
    }

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    log::info!(
        "starting {:?}: {}x{} board, {}px cells, {}ms tick",
        config.title,
        config.width,
        config.height,
        config.cell_size,
        config.tick_ms
    );

    macroquad::Window::from_config(window_conf(&config), async move {
        if let Err(err) = run(config).await {
            log::error!("{err}");
            std::process::exit(1);
        }
    });
}
