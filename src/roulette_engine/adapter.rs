use serde_json::{json, Value};
use tracing::warn;

use crate::roulette_engine::{
    engine::resolve_round,
    error::{RouletteError, RouletteResult},
    models::RoundRequest,
};

/// Resolve a JSON request into the JSON result object, or into the failure
/// envelope `{success: false, exception: {type, message}}`. Never returns a
/// partially settled round.
pub fn process_request(request: Value) -> Value {
    match try_process(request) {
        Ok(result) => result,
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "round rejected");
            failure(&err)
        }
    }
}

fn try_process(request: Value) -> RouletteResult<Value> {
    let request: RoundRequest = serde_json::from_value(request)
        .map_err(|e| RouletteError::SchemaInvalid { message: e.to_string() })?;
    let result = resolve_round(request)?;
    serde_json::to_value(&result).map_err(|e| RouletteError::SchemaInvalid { message: e.to_string() })
}

/// Failure envelope for `err`.
pub fn failure(err: &RouletteError) -> Value {
    json!({
        "success": false,
        "exception": {
            "type": err.kind(),
            "message": err.to_string()
        }
    })
}
