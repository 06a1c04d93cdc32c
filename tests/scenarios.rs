use std::io;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use rootnet::{parse_records, resolve, MatchOutcome, Record, SelectBox, SelectionResult};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn run(candidates: Vec<Record>, events: Vec<Event>) -> SelectionResult {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut select_box = SelectBox::new("Rootnet Projects", candidates);
    let mut events = events.into_iter();

    select_box
        .select(&mut terminal, || {
            events
                .next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
        })
        .unwrap()
}

fn prod() -> Vec<Record> {
    parse_records("prod-db | 10.0.0.1\nprod-web | 10.0.0.2\n".as_bytes()).unwrap()
}

#[test]
fn unique_query_resolves_without_selection() {
    assert_eq!(
        resolve("db", &prod()),
        MatchOutcome::Auto("10.0.0.1".to_string())
    );
}

#[test]
fn shared_prefix_opens_selection_with_both() {
    let records = prod();
    let MatchOutcome::Ambiguous(candidates) = resolve("prod", &records) else {
        panic!("expected an ambiguous outcome");
    };
    assert_eq!(candidates, records);

    let result = run(candidates, vec![key(KeyCode::Down), key(KeyCode::Enter)]);
    assert_eq!(result, SelectionResult::Chosen("10.0.0.2".to_string()));
}

#[test]
fn empty_host_list_only_cancels() {
    let MatchOutcome::Ambiguous(candidates) = resolve("anything", &[]) else {
        panic!("expected an ambiguous outcome");
    };
    assert!(candidates.is_empty());

    let result = run(
        candidates,
        vec![
            key(KeyCode::Enter),
            key(KeyCode::Enter),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ],
    );
    assert_eq!(result, SelectionResult::Cancelled);
}

#[test]
fn unmatched_filter_can_be_cleared() {
    let records = vec![Record::new("staging", "10.0.1.5")];
    let MatchOutcome::Ambiguous(candidates) = resolve("", &records) else {
        panic!("expected an ambiguous outcome");
    };

    let mut events: Vec<Event> = "xyz".chars().map(|c| key(KeyCode::Char(c))).collect();
    // no-op while nothing is visible
    events.push(key(KeyCode::Enter));
    events.extend((0..3).map(|_| key(KeyCode::Backspace)));
    events.push(key(KeyCode::Enter));

    let result = run(candidates, events);
    assert_eq!(result, SelectionResult::Chosen("10.0.1.5".to_string()));
}

#[test]
fn resize_keeps_selection() {
    let result = run(
        prod(),
        vec![
            key(KeyCode::Down),
            Event::Resize(40, 12),
            key(KeyCode::Enter),
        ],
    );
    assert_eq!(result, SelectionResult::Chosen("10.0.0.2".to_string()));
}
