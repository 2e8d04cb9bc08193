use std::fs;
use std::path::PathBuf;

use parlor_engine::blackjack_table::{standard_lineup, BlackjackConfig, BlackjackTable};
use parlor_engine::cards::parse_cards;
use parlor_engine::deck::Deck;
use parlor_engine::game::{HoldemConfig, HoldemStage, HoldemTable};
use parlor_engine::logger::{ActionRecord, HandLogger, HandRecord, RoundRecord};
use parlor_engine::player::{PlayerAction, SeatConfig};

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample_record() -> HandRecord {
    HandRecord {
        hand_id: "20250102-000001".to_string(),
        seed: Some(1),
        dealer: 0,
        holes: vec![parse_cards("AS KD").unwrap(), parse_cards("2C 2D").unwrap()],
        actions: vec![ActionRecord {
            seat: 1,
            street: HoldemStage::Preflop,
            action: PlayerAction::Check,
            paid: 0,
        }],
        board: parse_cards("AC 7H 8D 9S TC").unwrap(),
        awards: vec![],
        stacks: vec![1000, 1000],
        ts: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let _ = fs::remove_file(&path);
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("handlog_ts");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = sample_record();
    logger.write(&rec).expect("write");
    let preset = "2030-01-01T00:00:00Z".to_string();
    logger
        .write(&HandRecord {
            ts: Some(preset.clone()),
            ..rec
        })
        .expect("write2");
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: HandRecord = serde_json::from_str(lines[0]).unwrap();
    assert!(first.ts.is_some(), "ts should be injected");
    let second: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.ts.as_deref(), Some(preset.as_str()));
    let _ = fs::remove_file(&path);
}

#[test]
fn records_capture_a_played_hand() {
    let seats = vec![SeatConfig::ai(0, 1000), SeatConfig::ai(1, 1000)];
    let mut t = HoldemTable::new(seats, HoldemConfig::default()).unwrap();
    t.start_hand(Deck::new_with_seed(11)).unwrap();
    t.apply_action(PlayerAction::Fold).unwrap();
    let rec = HandRecord::from_table("20250102-000003".to_string(), Some(11), &t);
    assert_eq!(rec.actions.len(), 1);
    assert_eq!(rec.board.len(), 5);
    assert_eq!(rec.awards.len(), 1);
    assert_eq!(rec.stacks.iter().sum::<u32>(), 2000);

    let json = serde_json::to_value(&rec).unwrap();
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["actions", "awards", "board", "dealer", "hand_id", "holes", "seed", "stacks", "ts"]
    );
}

#[test]
fn round_records_skip_the_dealer_seat() {
    let mut t = BlackjackTable::new(standard_lineup(4, 100, None), BlackjackConfig::default())
        .unwrap();
    t.start_round(Deck::new_with_seed(5));
    t.place_initial_bets(None).unwrap();
    t.deal_initial_cards().unwrap();
    t.resolve_round().unwrap();
    let rec = RoundRecord::from_table("20250102-000004".to_string(), Some(5), &t);
    assert_eq!(rec.seats.len(), 3);
    assert!(rec.seats.iter().all(|s| s.seat != t.dealer_index));
    assert!(rec.dealer_total >= 17);
}
