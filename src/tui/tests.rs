//! Integration tests for the terminal front end.
//!
//! Drives a real `Driver` with key presses and draws every frame on a
//! `TestBackend`.

use super::keys::command_for_key;
use super::view::ui;
use crate::config::{Palette, VisConfig};
use crate::driver::{Driver, Phase};
use crate::engine::{Algorithm, Order};
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(120, 40);
    Terminal::new(backend).expect("Failed to create terminal")
}

fn buffer_text(buffer: &Buffer) -> String {
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn press(driver: &mut Driver, key: char) {
    if let Some(command) = command_for_key(KeyCode::Char(key)) {
        driver.handle(command).expect("command");
    }
}

fn draw(terminal: &mut Terminal<TestBackend>, driver: &Driver) -> String {
    let palette = Palette::default();
    let config = VisConfig::default();
    terminal
        .draw(|f| ui(f, &driver.frame(), &palette, config.layout))
        .expect("UI should render without panic");
    buffer_text(terminal.backend().buffer())
}

#[test]
fn test_idle_frame_shows_selection_and_controls() {
    let config = VisConfig::builder().seed(42).length(30).build();
    let driver = Driver::new(&config).expect("driver");
    let mut terminal = create_test_terminal();

    let text = draw(&mut terminal, &driver);
    assert!(text.contains("Bubble Sort"));
    assert!(text.contains("Ascending"));
    assert!(text.contains("SPACE - Start Sorting"));
    assert!(text.contains("1 - Insertion Sort"));
    assert!(text.contains("3 - Selection Sort"));
    assert!(text.contains("IDLE"));
}

#[test]
fn test_keyboard_session() {
    let config = VisConfig::builder().seed(7).length(12).build();
    let mut driver = Driver::new(&config).expect("driver");
    let mut terminal = create_test_terminal();

    press(&mut driver, '3');
    press(&mut driver, 'd');
    let text = draw(&mut terminal, &driver);
    assert!(text.contains("Selection Sort - Descending"));

    press(&mut driver, ' ');
    assert_eq!(driver.phase(), Phase::Sorting);

    // Locked while sorting.
    press(&mut driver, '1');
    press(&mut driver, 'a');
    assert_eq!(driver.algorithm(), Algorithm::Selection);
    assert_eq!(driver.order(), Order::Descending);

    driver.tick().expect("tick");
    let text = draw(&mut terminal, &driver);
    assert!(text.contains("SORTING"));

    while driver.phase() == Phase::Sorting {
        driver.tick().expect("tick");
        draw(&mut terminal, &driver);
    }
    assert!(Order::Descending.is_sorted(driver.values()));

    press(&mut driver, 'r');
    assert_eq!(driver.phase(), Phase::Idle);
    press(&mut driver, 'q');
    assert!(driver.should_quit());
}

#[test]
fn test_reset_mid_sort_redraws_idle() {
    let config = VisConfig::builder().seed(3).length(50).build();
    let mut driver = Driver::new(&config).expect("driver");
    let mut terminal = create_test_terminal();

    press(&mut driver, ' ');
    for _ in 0..5 {
        driver.tick().expect("tick");
    }
    press(&mut driver, 'r');
    driver.tick().expect("tick");

    let text = draw(&mut terminal, &driver);
    assert!(text.contains("IDLE"));
    assert!(driver.frame().highlights.is_empty());
}

#[test]
fn test_small_terminal_renders() {
    let config = VisConfig::builder().seed(1).length(100).build();
    let driver = Driver::new(&config).expect("driver");
    let backend = TestBackend::new(30, 12);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let palette = Palette::default();
    terminal
        .draw(|f| ui(f, &driver.frame(), &palette, config.layout))
        .expect("small terminal should render");
}
