use pretty_assertions::assert_eq;

use super::*;

#[test]
fn lines_and_fragments_share_the_buffer() {
    let handler = buffer_handler();
    handler.print("1");
    handler.print(" ");
    handler.println("2 3");
    handler.println("");
    assert_eq!(handler.get_output(), "1 2 3\n\n");
}

#[test]
fn take_output_drains() {
    let handler = buffer_handler();
    handler.println("first");
    assert_eq!(handler.take_output(), "first\n");
    handler.print("second");
    assert_eq!(handler.take_output(), "second");
    assert_eq!(handler.get_output(), "");
}

#[test]
fn clear_empties_the_buffer() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn callback_sees_each_chunk() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = callback_handler(move |text| sink.lock().push(text.to_string()));

    handler.println("a b");
    handler.print("c");

    assert_eq!(*seen.lock(), vec!["a b\n".to_string(), "c".to_string()]);
    assert_eq!(handler.get_output(), "");
}

#[test]
fn sinks_without_a_buffer_report_nothing() {
    let silent = silent_handler();
    silent.println("hello");
    assert_eq!(silent.get_output(), "");
    assert_eq!(silent.take_output(), "");
    assert_eq!(stdout_handler().get_output(), "");
}

#[test]
fn debug_names_the_sink() {
    assert_eq!(format!("{:?}", buffer_handler()), "Buffer");
    assert_eq!(format!("{:?}", silent_handler()), "Silent");
}

#[test]
fn buffer_is_shared_across_threads() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);

    let writer = std::thread::spawn(move || {
        for _ in 0..100 {
            other.println("a");
        }
    });
    for _ in 0..100 {
        handler.println("b");
    }
    writer.join().unwrap();

    assert_eq!(handler.get_output().lines().count(), 200);
}
