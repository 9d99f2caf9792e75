//! Frame rendering against ratatui's TestBackend.

use ratatui::{backend::TestBackend, Terminal};

use pcterm::app::Session;
use pcterm::contact::Focus;
use pcterm::theme::Theme;
use pcterm::types::{AppEvent, ArcadeMode, Key, SubmitOutcome, View};
use pcterm::ui;

fn render(session: &Session, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| ui::draw(f, session, &Theme::Neon.colors()))
        .unwrap();
    terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
}

fn sized(width: u16, height: u16) -> Session {
    let mut s = Session::with_seed(9);
    s.handle(AppEvent::Resize { width, height });
    s
}

#[test]
fn test_empty_area_draws_nothing() {
    let s = sized(80, 24);
    assert!(render(&s, 0, 0).is_empty());
}

#[test]
fn test_waits_for_geometry() {
    let s = Session::with_seed(9);
    assert!(render(&s, 80, 24).contains("still initializing..."));
}

#[test]
fn test_small_terminal_gets_notice() {
    let s = sized(20, 5);
    let text = render(&s, 20, 5);
    assert!(text.contains("terminal too small"));
    assert!(!text.contains("P C S T Y L E"));
}

#[test]
fn test_every_view_renders_its_screen() {
    let cases = [
        (View::Home, "P C S T Y L E . D E V"),
        (View::Contact, "[ Submit ]"),
        (View::About, "About pcstyle.dev"),
        (View::Help, "EASTER EGGS & SECRETS"),
        (View::SecretsLog, ":: "),
        (View::Arcade(ArcadeMode::Menu), "mini arcade hub"),
        (View::Arcade(ArcadeMode::Snake), "SNAKE.exe"),
        (View::Arcade(ArcadeMode::Screensaver), "MATRIX RAIN"),
    ];
    for (view, needle) in cases {
        let mut s = sized(80, 24);
        s.handle(AppEvent::Navigate(view));
        let text = render(&s, 80, 24);
        assert!(text.contains(needle), "{} should show {needle:?}", view.name());
    }
}

#[test]
fn test_home_marks_selected_item() {
    let mut s = sized(80, 24);
    s.handle(AppEvent::Key(Key::Down));
    let text = render(&s, 80, 24);
    assert!(text.contains("→ About"));
}

#[test]
fn test_contact_shows_typed_text_and_result() {
    let mut s = sized(80, 24);
    s.handle(AppEvent::Navigate(View::Contact));
    for c in "hello there".chars() {
        s.handle(AppEvent::Key(Key::Char(c)));
    }
    assert!(render(&s, 80, 24).contains("hello there"));

    while s.contact().focus() != Focus::Submit {
        s.handle(AppEvent::Key(Key::Tab));
    }
    s.handle(AppEvent::Key(Key::Enter));
    assert!(render(&s, 80, 24).contains("Sending..."));

    s.handle(AppEvent::SubmitResult { id: 1, outcome: SubmitOutcome::ok("thanks") });
    assert!(render(&s, 80, 24).contains("thanks"));
}

#[test]
fn test_paused_snake_is_labelled() {
    let mut s = sized(80, 24);
    s.handle(AppEvent::Navigate(View::Arcade(ArcadeMode::Snake)));
    s.handle(AppEvent::Key(Key::Char(' ')));
    assert!(s.arcade().is_paused());
    assert!(render(&s, 80, 24).contains("[PAUSED]"));
}

#[test]
fn test_respawn_hint_only_in_snake_view() {
    let mut s = sized(80, 24);
    s.handle(AppEvent::Navigate(View::Arcade(ArcadeMode::Menu)));
    assert!(!render(&s, 80, 24).contains("respawn"));

    s.handle(AppEvent::Key(Key::Enter));
    assert_eq!(s.view(), View::Arcade(ArcadeMode::Snake));
    assert!(render(&s, 80, 24).contains("r respawn"));
}

#[test]
fn test_goodbye_banner_uses_crlf() {
    let banner = ui::goodbye_banner();
    assert!(banner.ends_with("Thanks for visiting pcstyle.dev!\r\n"));
    assert!(banner.lines().all(|l| !l.ends_with(' ')));
    assert!(!banner.replace("\r\n", "").contains('\n'));
}
