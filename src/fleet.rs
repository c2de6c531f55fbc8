//! Invader formation layout.
//!
//! Invaders sit on a grid with one invader-width of space between columns and
//! one invader-height between rows. The top row starts below the scoreboard;
//! the bottom 14 invader-heights of the screen stay empty so the ship has room.

use crate::entities::Invader;
use crate::settings::Settings;

/// Gap between the top of the screen and the first row, below the scoreboard.
pub const SCOREBOARD_MARGIN: f32 = 22.0;

/// Rows stop this many invader-heights above the bottom of the screen.
pub const BOTTOM_CLEARANCE_ROWS: f32 = 14.0;

/// Upper bound on rows and on columns of any layout.
pub const MAX_GRID_CELLS: u32 = 256;

/// Top-left corners of every invader in a fresh fleet, row by row.
///
/// Returns an empty layout when the invader box is not a positive finite size
/// or does not fit the screen. At most [`MAX_GRID_CELLS`] rows and columns
/// are laid out.
pub fn fleet_positions(
    screen_width: f32,
    screen_height: f32,
    alien_width: f32,
    alien_height: f32,
) -> Vec<(f32, f32)> {
    let sane = |v: f32| v.is_finite() && v > 0.0;
    if !sane(alien_width)
        || !sane(alien_height)
        || !screen_width.is_finite()
        || !screen_height.is_finite()
    {
        return Vec::new();
    }

    let max_y = screen_height - BOTTOM_CLEARANCE_ROWS * alien_height;
    let max_x = screen_width - 2.0 * alien_width;

    let mut positions = Vec::new();
    for row in 0..MAX_GRID_CELLS {
        let y = alien_height + SCOREBOARD_MARGIN + 2.0 * alien_height * row as f32;
        if y >= max_y {
            break;
        }
        for col in 0..MAX_GRID_CELLS {
            let x = alien_width + 2.0 * alien_width * col as f32;
            if x >= max_x {
                break;
            }
            positions.push((x, y));
        }
    }
    positions
}

/// Build a full fleet for the configured screen and invader size.
pub fn create_fleet(settings: &Settings) -> Vec<Invader> {
    let fleet: Vec<Invader> = fleet_positions(
        settings.screen_width,
        settings.screen_height,
        settings.alien_width,
        settings.alien_height,
    )
    .into_iter()
    .map(|(x, y)| Invader::new(x, y, settings.alien_width, settings.alien_height))
    .collect();

    if fleet.is_empty() {
        log::warn!(
            "Screen {}x{} too small for {}x{} invaders, fleet is empty",
            settings.screen_width,
            settings.screen_height,
            settings.alien_width,
            settings.alien_height
        );
    } else {
        log::debug!("Created fleet of {} invaders", fleet.len());
    }
    fleet
}
