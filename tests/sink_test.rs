/*!
 * Sink Tests
 * Behavioral tests for the string sink write operations
 */

use pretty_assertions::assert_eq;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use string_sink::{args, FormatOptions, SinkConfig, StringSink, Value};

fn digest(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_write_returns_length_and_grows_size() {
    let mut sink = StringSink::new();

    for chunk in ["", "a", "hello world", "ünïcödé", "\0\0\0"] {
        let before = sink.size();
        let written = sink.write(chunk).unwrap();
        assert_eq!(written, chunk.len());
        assert_eq!(sink.size(), before + written);
    }
}

#[test]
fn test_putc_truncates_to_low_byte() {
    let mut sink = StringSink::new();
    sink.putc(321).unwrap();
    assert_eq!(sink.string(), "A");
    assert_eq!(sink.size(), 1);
}

#[test]
fn test_puts_newline_handling() {
    let mut sink = StringSink::new();
    sink.puts(&[]).unwrap();
    assert_eq!(sink.string(), "\n");

    let mut sink = StringSink::new();
    sink.puts(&args!["a"]).unwrap();
    assert_eq!(sink.string(), "a\n");

    let mut sink = StringSink::new();
    sink.puts(&args!["a\n"]).unwrap();
    assert_eq!(sink.string(), "a\n");
}

#[test]
fn test_puts_list_matches_separate_calls() {
    let mut listed = StringSink::new();
    listed.puts(&args![vec!["a", "b"]]).unwrap();

    let mut separate = StringSink::new();
    separate.puts(&args!["a"]).unwrap();
    separate.puts(&args!["b"]).unwrap();

    assert_eq!(listed.string(), separate.string());
}

#[test]
fn test_printf_decimal() {
    let mut sink = StringSink::new();
    sink.printf("%d\n", &args![42]).unwrap();
    assert_eq!(sink.string(), "42\n");
}

#[test]
fn test_four_byte_character_preserved() {
    let mut sink = StringSink::new();
    sink.write("a").unwrap();

    let before = sink.size();
    sink.append("𝄞").unwrap();
    assert_eq!(sink.size(), before + 4);
    assert_eq!(&sink.as_bytes()[1..], "𝄞".as_bytes());
    assert_eq!(sink.to_str().unwrap(), "a𝄞");
}

#[test]
fn test_million_small_appends() {
    const COUNT: usize = 1_000_000;
    let mut sink = StringSink::new();

    for _ in 0..COUNT {
        sink.append("abc").unwrap();
    }

    assert_eq!(sink.size(), 3 * COUNT);
    assert_eq!(sink.string(), "abc".repeat(COUNT).as_bytes());
}

#[test]
fn test_capacity_and_integrity_across_reallocations() {
    let mut sink = StringSink::new();
    let mut expected = Vec::new();
    let mut last_capacity = sink.capacity();
    let mut reallocations_seen = 0;

    for round in 0..5_000u32 {
        let chunk = format!("{}:{};", round, round.wrapping_mul(2_654_435_761));
        sink.write(&chunk).unwrap();
        expected.extend_from_slice(chunk.as_bytes());

        assert!(sink.capacity() >= sink.size());
        if sink.capacity() != last_capacity {
            reallocations_seen += 1;
            last_capacity = sink.capacity();
            assert_eq!(digest(sink.as_bytes()), digest(&expected));
        }
    }

    assert!(reallocations_seen > 1);
    assert_eq!(sink.stats().reallocations, reallocations_seen);
    assert_eq!(digest(&sink.string()), digest(&expected));
}

#[test]
fn test_string_idempotent() {
    let mut sink = StringSink::new();
    sink.print(&args!["x", 1, true]).unwrap();

    let first = sink.string();
    let second = sink.string();
    assert_eq!(first, second);
    assert_eq!(sink.to_s(), first);
}

#[test]
fn test_snapshot_unaffected_by_later_writes() {
    let mut sink = StringSink::new();
    sink.write("one").unwrap();
    let snapshot = sink.string();

    sink.write(" two").unwrap();
    sink.shrink();
    sink.write(" three").unwrap();

    assert_eq!(snapshot, "one");
    assert_eq!(sink.string(), "one two three");
}

#[test]
fn test_failed_calls_leave_content_unchanged() {
    let mut sink = StringSink::new();
    sink.write("stable").unwrap();

    assert!(sink.putc("").is_err());
    assert!(sink.putc(Value::Nil).is_err());
    assert!(sink.print(&[Value::Int(1), Value::Opaque("Socket")]).is_err());
    assert!(sink.puts(&[Value::Str("a"), Value::Opaque("Socket")]).is_err());
    assert!(sink.printf("%d", &args!["not a number"]).is_err());
    assert!(sink.printf("%d %d", &args![1]).is_err());

    assert_eq!(sink.string(), "stable");
}

#[test]
fn test_lenient_arity() {
    let config = SinkConfig::default().with_format(FormatOptions::lenient());
    let mut sink = StringSink::with_config(config).unwrap();
    sink.printf("%d", &args![1, 2, 3]).unwrap();
    assert_eq!(sink.string(), "1");

    sink.set_format_options(FormatOptions::strict());
    assert!(sink.printf("%d", &args![1, 2]).unwrap_err().is_format());
}

#[test]
fn test_initial_capacity_from_config() {
    let config = SinkConfig::default().with_initial_capacity(1024);
    let mut sink = StringSink::with_config(config).unwrap();
    assert!(sink.capacity() >= 1024);

    sink.write(vec![b'x'; 1024]).unwrap();
    assert_eq!(sink.stats().reallocations, 0);
}

#[test]
fn test_into_bytes_takes_content() {
    let mut sink = StringSink::new();
    sink.puts(&args!["a", 2]).unwrap();
    assert_eq!(sink.into_bytes(), "a\n2\n");
}

#[test]
fn test_std_write_adapters() {
    use std::io::Write;

    let mut sink = StringSink::new();
    writeln!(sink, "{:>4}|{:<4}|", 12, "ab").unwrap();
    sink.flush().unwrap();
    assert_eq!(sink.string(), "  12|ab  |\n");
}
