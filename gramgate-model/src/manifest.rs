use serde::Serialize;

/// Static service manifest served at the root endpoint.
///
/// Informational only; the endpoint list is a declaration, not a view of
/// the live route registry.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manifest_serializes_flat() {
        let manifest = Manifest {
            service: "gramgate",
            version: "0.1.0",
            endpoints: &["/send-message"],
        };
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "service": "gramgate",
                "version": "0.1.0",
                "endpoints": ["/send-message"],
            })
        );
    }
}
