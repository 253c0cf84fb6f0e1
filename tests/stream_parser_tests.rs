use cora::api::stream::{ChunkAssembler, StreamParser};
use cora::types::{Chunk, OutputItem, ResponseStreamEvent};

#[test]
fn test_fragmented_events() {
    let mut parser = StreamParser::new();

    let chunk1 = b"event: response.output_text.delta\ndata: {\"type\":\"response.output";
    let events1 = parser.process(chunk1).expect("first chunk parse");
    assert_eq!(events1.len(), 0);

    let chunk2 = b"_text.delta\",\"item_id\":\"msg_1\",\"delta\":\"Hi\"}\n\n";
    let events2 = parser.process(chunk2).expect("second chunk parse");
    assert_eq!(events2.len(), 1);
    match &events2[0] {
        ResponseStreamEvent::OutputTextDelta { item_id, delta } => {
            assert_eq!(item_id.as_deref(), Some("msg_1"));
            assert_eq!(delta, "Hi");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_parse_error_handling() {
    let mut parser = StreamParser::new();

    let chunk = b"event: response.created\ndata: {invalid json}\n\n";
    let events = parser
        .process(chunk)
        .expect("error handling should not fail parser");
    assert_eq!(events.len(), 0);
}

#[test]
fn test_crlf_frames_and_done_marker() {
    let mut parser = StreamParser::new();

    let chunk = b"data: {\"type\":\"response.output_text.delta\",\"delta\":\"a\"}\r\n\r\ndata: [DONE]\r\n\r\n";
    let events = parser.process(chunk).expect("crlf frames parse");
    assert_eq!(events.len(), 1);
    assert!(parser.flush().is_empty());
}

#[test]
fn test_multi_line_data_is_joined() {
    let mut parser = StreamParser::new();

    let chunk = b"event: response.output_item.added\ndata: {\"type\":\"response.output_item.added\",\ndata: \"output_index\":0,\"item\":{\"type\":\"function_call\",\"id\":\"fc_1\",\"call_id\":\"call_1\",\"name\":\"search\"}}\n\n";
    let events = parser.process(chunk).expect("multi-line data parse");
    assert_eq!(events.len(), 1);
    match &events[0] {
        ResponseStreamEvent::OutputItemAdded {
            item: OutputItem::FunctionCall { call_id, name, .. },
            ..
        } => {
            assert_eq!(call_id, "call_1");
            assert_eq!(name, "search");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_function_call_is_reported_on_every_related_event() {
    let mut parser = StreamParser::new();
    let mut assembler = ChunkAssembler::new();

    let stream = br#"event: response.output_item.added
data: {"type":"response.output_item.added","output_index":0,"item":{"type":"function_call","id":"fc_1","call_id":"call_1","name":"get_products","arguments":""}}

event: response.function_call_arguments.delta
data: {"type":"response.function_call_arguments.delta","item_id":"fc_1","output_index":0,"delta":"{\"q\":\"eggshell\"}"}

event: response.output_item.done
data: {"type":"response.output_item.done","output_index":0,"item":{"type":"function_call","id":"fc_1","call_id":"call_1","name":"get_products","arguments":"{\"q\":\"eggshell\"}"}}

event: response.output_text.delta
data: {"type":"response.output_text.delta","item_id":"msg_1","delta":"Try Zava Eggshell."}

event: response.completed
data: {"type":"response.completed","response":{"id":"resp_1","status":"completed"}}

"#;

    let chunks: Vec<Chunk> = parser
        .process(stream)
        .expect("stream parses")
        .into_iter()
        .filter_map(|event| assembler.push(event).expect("no upstream failure"))
        .collect();

    assert_eq!(
        chunks,
        vec![
            Chunk::function_call("call_1", "get_products"),
            Chunk::function_call("call_1", "get_products"),
            Chunk::function_call("call_1", "get_products"),
            Chunk::text("Try Zava Eggshell."),
        ]
    );
    assert!(assembler.is_finished());
}

#[test]
fn test_character_split_across_reads_is_decoded_whole() {
    let mut parser = StreamParser::new();
    let frame = "event: response.output_text.delta\ndata: {\"type\":\"response.output_text.delta\",\"delta\":\"Zava’s paint\"}\n\n".as_bytes();
    let split = frame
        .iter()
        .position(|byte| *byte == 0xE2)
        .expect("first byte of the apostrophe")
        + 1;

    let events1 = parser.process(&frame[..split]).expect("first half");
    assert!(events1.is_empty());
    let events2 = parser.process(&frame[split..]).expect("second half");
    assert_eq!(events2.len(), 1);
    match &events2[0] {
        ResponseStreamEvent::OutputTextDelta { delta, .. } => assert_eq!(delta, "Zava’s paint"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_frame_is_an_error() {
    let mut parser = StreamParser::new();

    let result = parser.process(b"data: {\"type\":\"response.output_text.delta\",\"delta\":\"\xff\"}\n\n");
    assert!(result.is_err());
}
