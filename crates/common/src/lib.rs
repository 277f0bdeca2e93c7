pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_response_serializes_envelope() {
        let body = serde_json::to_value(types::MessageResponse::ok("done")).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "message": "done"}));

        let body = serde_json::to_value(types::MessageResponse::failed("nope")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
    }
}
