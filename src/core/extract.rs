//! 请求输入解析：JSON 请求体、调用方请求头、宽松数字解析

use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::error::CoreError;

/// 网关注入的调用方用户名请求头
pub const CONSUMER_HEADER: &str = "x-consumer-username";

/// 缺少调用方请求头时的回显值
pub const UNKNOWN_CONSUMER: &str = "unknown";

/// JSON 请求体上限，与常见网关默认值一致 (100 KiB)
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// 中间件解码后的 JSON 请求体，放在请求扩展中供处理器读取
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// 把原始请求体解码为 JSON。
///
/// 空请求体视为空对象。其余情况下第一个非空白字符必须是 `{` 或 `[`，
/// 否则 (包括只有空白) 返回 [`CoreError::Internal`]。
pub fn decode_json_value(body: &[u8]) -> Result<Value, CoreError> {
    if body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match body.iter().position(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
        Some(pos) if matches!(body[pos], b'{' | b'[') => {}
        Some(pos) => {
            return Err(CoreError::Internal(format!(
                "Unexpected token {:?} in JSON at position {pos}",
                body[pos] as char
            )))
        }
        None => {
            return Err(CoreError::Internal(
                "Unexpected end of JSON input".to_string(),
            ))
        }
    }

    serde_json::from_slice(body).map_err(|e| CoreError::Internal(e.to_string()))
}

/// 把已解码的请求体转换为处理器的输入类型。
///
/// 没有 JSON 请求体或请求体不是对象时，所有字段取默认值。
pub fn typed_body<T>(body: Option<JsonBody>) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    match body {
        Some(JsonBody(value @ Value::Object(_))) => {
            serde_json::from_value(value).map_err(|e| CoreError::Internal(e.to_string()))
        }
        _ => Ok(T::default()),
    }
}

/// `Content-Type` 是否为 `application/json` (忽略大小写与参数)
pub fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// 读取调用方用户名，缺失、为空或非文本时返回 `"unknown"`
pub fn consumer_name(headers: &HeaderMap) -> String {
    headers
        .get(CONSUMER_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_CONSUMER)
        .to_string()
}

/// 按 `parseInt(s, 10)` 的规则解析整数前缀。
///
/// 跳过前导空白，接受可选符号和最长的数字前缀，忽略其后的内容。
/// 没有数字 (或超出 `i64`) 时返回 `None`，不会与任何 id 相等。
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// 按 `parseFloat(s)` 的规则解析浮点数前缀，无法解析时返回 `NaN`。
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
