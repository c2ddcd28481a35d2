use super::*;

#[test]
fn peek_is_zero_at_eof() {
    let c = Cursor::new(b"");
    assert!(c.eof());
    assert_eq!(c.peek(), 0);
}

#[test]
fn consume_advances_and_fails_at_eof() {
    let mut c = Cursor::new(b"Si");
    assert_eq!(c.consume().unwrap(), b'S');
    assert_eq!(c.consume().unwrap(), b'i');
    assert!(c.eof());
    assert!(c.consume().is_err());
}

#[test]
fn expect_does_not_advance_on_mismatch() {
    let mut c = Cursor::new(b"x");
    assert!(c.expect(b'y').is_err());
    assert_eq!(c.pos(), 0);
    assert!(c.expect(b'x').is_ok());
    assert_eq!(c.pos(), 1);
}

#[test]
fn match_string_is_lookahead_only() {
    let mut c = Cursor::new(b"hello");
    assert!(!c.match_string("world"));
    assert_eq!(c.pos(), 0);
    assert!(c.match_string("hell"));
    assert_eq!(c.pos(), 4);
}

#[test]
fn read_number_reads_maximal_digit_run() {
    let mut c = Cursor::new(b"123abc");
    assert_eq!(c.read_number().unwrap(), 123);
    assert_eq!(c.pos(), 3);
}

#[test]
fn read_number_fails_with_no_digits() {
    let mut c = Cursor::new(b"abc");
    assert!(c.read_number().is_err());
    assert_eq!(c.pos(), 0);
}

#[test]
fn read_identifier_reads_length_prefixed_bytes() {
    let mut c = Cursor::new(b"5Hello_rest");
    assert_eq!(c.read_identifier().unwrap(), "Hello");
    assert_eq!(c.pos(), 6);
}

#[test]
fn read_identifier_rejects_zero_length() {
    let mut c = Cursor::new(b"0rest");
    assert!(c.read_identifier().is_err());
}

#[test]
fn read_identifier_rejects_overflowing_length() {
    let mut c = Cursor::new(b"99short");
    assert!(c.read_identifier().is_err());
}

#[test]
fn save_restore_round_trips_position() {
    let mut c = Cursor::new(b"Si_SStc");
    c.consume().unwrap();
    let snap = c.save();
    c.consume().unwrap();
    c.consume().unwrap();
    assert_eq!(c.pos(), 3);
    c.restore(snap);
    assert_eq!(c.pos(), 1);
}
