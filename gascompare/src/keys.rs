use crate::data_structures::{EventId, JoinKey};
use crate::error::{PipelineError, Result};

/// Derive the canonical join key `"{actor}|{local_event_id}"` for one event.
/// The same logical event yields an identical key on the client-origin and
/// network-origin record, whatever shape its identifier took in the log.
pub fn join_key(actor: &str, event: &EventId) -> Result<JoinKey> {
    match event {
        EventId::FileId(id) => Ok(format!("{actor}|{id}")),
        EventId::RequestId(request_id) => {
            let sequence = share_sequence(request_id)?;
            Ok(format!("{actor}|{sequence}"))
        }
    }
}

/// Extract the comparable sequence number from a share request id of shape
/// "X|Y". Anything other than exactly one delimiter is a hard error.
pub fn share_sequence(request_id: &str) -> Result<&str> {
    let mut segments = request_id.split('|');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(sequence), None) => Ok(sequence),
        _ => Err(PipelineError::MalformedIdentifier {
            identifier: request_id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_uses_file_id_directly() {
        let key = join_key("0xAbc", &EventId::FileId(42)).unwrap();
        assert_eq!(key, "0xAbc|42");
    }

    #[test]
    fn test_share_key_takes_second_segment() {
        let key = join_key("A", &EventId::RequestId("r|7".to_string())).unwrap();
        assert_eq!(key, "A|7");
    }

    #[test]
    fn test_share_id_without_delimiter_is_rejected() {
        let err = share_sequence("no-delimiter").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_share_id_with_two_delimiters_is_rejected() {
        let err = join_key("A", &EventId::RequestId("a|b|c".to_string())).unwrap_err();
        match err {
            PipelineError::MalformedIdentifier { identifier } => {
                assert_eq!(identifier, "a|b|c");
            }
            other => panic!("expected MalformedIdentifier, got {other:?}"),
        }
    }
}
