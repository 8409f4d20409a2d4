//! Calculatorサービス
//!
//! 四則演算を行う。業務エラー（未知のオペレーション、ゼロ除算、不正なオペランド）は
//! すべて `error` フィールドで返し、HTTPステータスは常に200。

use serve_ingress_common::protocol::{CalcOperation, JsonObject, Reply, CALCULATOR_SERVICE_NAME};
use serde_json::Value;

const USAGE: &str =
    "Send a POST request with 'operation' (add/subtract/multiply/divide), 'a', and 'b'";
const NON_FINITE_RESULT: &str = "Result is not a finite number";

/// 四則演算サービス
#[derive(Debug, Clone)]
pub struct Calculator {
    service_name: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            service_name: CALCULATOR_SERVICE_NAME.to_string(),
        }
    }
}

impl Calculator {
    /// リクエストを処理する
    pub fn handle(&self, body: Option<&JsonObject>) -> Reply {
        let Some(body) = body else {
            return Reply::usage(USAGE, self.service_name.as_str());
        };

        let a = match operand(body, "a") {
            Ok(v) => v,
            Err(message) => return Reply::service_error(message, self.service_name.as_str()),
        };
        let b = match operand(body, "b") {
            Ok(v) => v,
            Err(message) => return Reply::service_error(message, self.service_name.as_str()),
        };

        let raw_operation = body.get("operation");
        let Some(operation) = raw_operation
            .and_then(Value::as_str)
            .and_then(CalcOperation::parse)
        else {
            return Reply::error(format!(
                "Unknown operation: {}",
                describe_operation(raw_operation)
            ));
        };

        match operation.checked_apply(a, b) {
            Some(result) if result.is_finite() => Reply::Calculation {
                operation,
                a,
                b,
                result,
                service: self.service_name.clone(),
            },
            // JSONはinf/NaNを表現できない（nullになる）ため成功扱いにしない
            Some(_) => Reply::service_error(NON_FINITE_RESULT, self.service_name.as_str()),
            None => Reply::error("Division by zero"),
        }
    }
}

/// オペランドを浮動小数点数に変換する
///
/// 未指定は0。有限の数値と数値文字列を受け付け、それ以外（`"inf"`, `"nan"` を含む）はエラー。
fn operand(body: &JsonObject, key: &str) -> Result<f64, String> {
    let Some(value) = body.get(key) else {
        return Ok(0.0);
    };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid operand '{}': {}", key, value))
}

/// エラーメッセージ用のオペレーション表記
///
/// 既存クライアントとの互換のため、未指定は `None`、真偽値は `True` / `False`、
/// 文字列はそのまま、それ以外はJSON表記にする。
fn describe_operation(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
