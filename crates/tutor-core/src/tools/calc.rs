//! Calculator tool for AI assistants
//!
//! This module provides a restricted arithmetic evaluator and the calculator
//! tool built on top of it. Only numbers, whitespace, `+ - * / ( ) .` are
//! accepted; nothing beyond arithmetic is ever evaluated.

use crate::number::Number;
use crate::tools::AiTool;
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Characters an expression may consist of
static ALLOWED_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s+\-*/().]+$").expect("valid expression pattern"));

/// Deepest nesting of parentheses and unary operators accepted
const MAX_DEPTH: usize = 200;

/// Most decimal digits an integer literal or result may have
const MAX_INT_DIGITS: usize = 4300;

/// Bit length bounding integer results, about `MAX_INT_DIGITS` decimal digits
const MAX_INT_BITS: u64 = 14_300;

/// Why an expression produced no number
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// The expression contains something other than arithmetic characters
    InvalidCharacters,
    /// The expression is malformed or its evaluation failed
    Evaluation(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidCharacters => write!(f, "Invalid characters in expression."),
            CalcError::Evaluation(details) => write!(f, "Error: {}", details),
        }
    }
}

impl std::error::Error for CalcError {}

fn eval_error(details: impl Into<String>) -> CalcError {
    CalcError::Evaluation(details.into())
}

/// Validate and evaluate an arithmetic expression.
///
/// Supports `+ - * /`, parentheses and unary signs with the usual
/// precedence, plus `**` (power) and `//` (floor division). Division always
/// yields a float; integer arithmetic is exact up to `MAX_INT_DIGITS` digits.
pub fn calculate(expression: &str) -> Result<Number, CalcError> {
    if !ALLOWED_EXPRESSION.is_match(expression) {
        return Err(CalcError::InvalidCharacters);
    }

    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(eval_error("empty expression"));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if parser.pos < tokens.len() {
        return Err(eval_error("invalid syntax"));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    LParen,
    RParen,
}

/// Split an expression into tokens.
///
/// Space, tab and form feed separate tokens anywhere. Line breaks are only
/// accepted inside parentheses or around the whole expression; any other
/// whitespace character is rejected.
fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut open_parens = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let doubled = chars.get(i + 1) == Some(&c);
        match c {
            ' ' | '\t' | '\x0c' => {}
            '\n' | '\r' => {
                let trailing = chars[i..].iter().all(|c| c.is_ascii_whitespace());
                if open_parens == 0 && !tokens.is_empty() && !trailing {
                    return Err(eval_error("invalid syntax"));
                }
            }
            c if c.is_whitespace() => {
                return Err(eval_error(format!(
                    "invalid non-printable character U+{:04X}",
                    c as u32
                )));
            }
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' if doubled => {
                tokens.push(Token::DoubleStar);
                i += 1;
            }
            '*' => tokens.push(Token::Star),
            '/' if doubled => {
                tokens.push(Token::DoubleSlash);
                i += 1;
            }
            '/' => tokens.push(Token::Slash),
            '(' => {
                open_parens += 1;
                tokens.push(Token::LParen);
            }
            ')' => {
                open_parens = open_parens.saturating_sub(1);
                tokens.push(Token::RParen);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let (len, number) = read_number(&chars[i..])?;
                tokens.push(Token::Num(number));
                i += len;
                continue;
            }
            other => return Err(eval_error(format!("invalid character '{}'", other))),
        }
        i += 1;
    }

    Ok(tokens)
}

/// Read one numeric literal, returning how many chars it spans
fn read_number(chars: &[char]) -> Result<(usize, Number), CalcError> {
    let mut literal = String::new();
    let mut has_decimal = false;
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        if c.is_ascii_digit() {
            literal.push(c);
        } else if c == '.' && !has_decimal {
            literal.push(c);
            has_decimal = true;
        } else {
            break;
        }
        i += 1;
    }

    if literal == "." {
        return Err(eval_error("invalid syntax"));
    }

    if has_decimal {
        let value = literal
            .parse::<f64>()
            .map_err(|_| eval_error(format!("invalid number '{}'", literal)))?;
        return Ok((i, Number::Float(value)));
    }

    if literal.len() > 1 && literal.starts_with('0') && literal.chars().any(|c| c != '0') {
        return Err(eval_error(
            "leading zeros in decimal integer literals are not permitted",
        ));
    }
    if literal.len() > MAX_INT_DIGITS {
        return Err(eval_error(format!(
            "integer literal exceeds the limit of {} digits",
            MAX_INT_DIGITS
        )));
    }
    let value = literal
        .parse::<BigInt>()
        .map_err(|_| eval_error(format!("invalid number '{}'", literal)))?;
    Ok((i, Number::Int(value)))
}

/// Recursive-descent parser evaluating as it goes:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/' | '//') factor)*
/// factor     := ('+' | '-') factor | power
/// power      := atom ('**' factor)?
/// atom       := NUMBER | '(' expression ')'
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek().cloned();
        self.pos += 1;
        token
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(eval_error("expression is too deeply nested"));
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<Number, CalcError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value = add(value, self.term()?)?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value = sub(value, self.term()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Number, CalcError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value = mul(value, self.factor()?)?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value = div(value, self.factor()?)?;
                }
                Token::DoubleSlash => {
                    self.pos += 1;
                    value = floor_div(value, self.factor()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<Number, CalcError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.factor();
                self.depth -= 1;
                value
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.factor().and_then(neg);
                self.depth -= 1;
                value
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Number, CalcError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::DoubleStar) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.factor();
            self.depth -= 1;
            return pow(base, exponent?);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Number, CalcError> {
        match self.next() {
            Some(Token::Num(number)) => Ok(number),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expression()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(eval_error("'(' was never closed")),
                }
            }
            Some(Token::RParen) => Err(eval_error("unmatched ')'")),
            _ => Err(eval_error("invalid syntax")),
        }
    }
}

fn too_large() -> CalcError {
    eval_error(format!(
        "integer result exceeds the limit of {} digits",
        MAX_INT_DIGITS
    ))
}

/// Keep integer results within `MAX_INT_BITS`
fn bounded(value: BigInt) -> Result<Number, CalcError> {
    if value.bits() > MAX_INT_BITS {
        return Err(too_large());
    }
    Ok(Number::Int(value))
}

/// Widen an operand for float arithmetic
fn to_float(value: &Number) -> Result<f64, CalcError> {
    match value {
        Number::Int(int) => int
            .to_f64()
            .filter(|float| float.is_finite())
            .ok_or_else(|| eval_error("int too large to convert to float")),
        Number::Float(float) => Ok(*float),
    }
}

fn add(lhs: Number, rhs: Number) -> Result<Number, CalcError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => bounded(a + b),
        (lhs, rhs) => Ok(Number::Float(to_float(&lhs)? + to_float(&rhs)?)),
    }
}

fn sub(lhs: Number, rhs: Number) -> Result<Number, CalcError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => bounded(a - b),
        (lhs, rhs) => Ok(Number::Float(to_float(&lhs)? - to_float(&rhs)?)),
    }
}

fn mul(lhs: Number, rhs: Number) -> Result<Number, CalcError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            if a.bits() + b.bits() > MAX_INT_BITS + 1 {
                return Err(too_large());
            }
            bounded(a * b)
        }
        (lhs, rhs) => Ok(Number::Float(to_float(&lhs)? * to_float(&rhs)?)),
    }
}

fn div(lhs: Number, rhs: Number) -> Result<Number, CalcError> {
    let divisor = to_float(&rhs)?;
    if divisor == 0.0 {
        return Err(eval_error("division by zero"));
    }
    Ok(Number::Float(to_float(&lhs)? / divisor))
}

fn floor_div(lhs: Number, rhs: Number) -> Result<Number, CalcError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            if b.is_zero() {
                return Err(eval_error("integer division or modulo by zero"));
            }
            let quotient = &a / &b;
            let remainder = &a % &b;
            if !remainder.is_zero() && (remainder.is_negative() != b.is_negative()) {
                bounded(quotient - 1)
            } else {
                bounded(quotient)
            }
        }
        (lhs, rhs) => {
            let divisor = to_float(&rhs)?;
            if divisor == 0.0 {
                return Err(eval_error("float floor division by zero"));
            }
            Ok(Number::Float((to_float(&lhs)? / divisor).floor()))
        }
    }
}

fn pow(base: Number, exponent: Number) -> Result<Number, CalcError> {
    if let (Number::Int(b), Number::Int(e)) = (&base, &exponent) {
        if !e.is_negative() {
            return int_pow(b, e);
        }
    }

    let (b, e) = (to_float(&base)?, to_float(&exponent)?);
    if b == 0.0 && e < 0.0 {
        return Err(eval_error("0.0 cannot be raised to a negative power"));
    }
    if b < 0.0 && e.fract() != 0.0 {
        return Err(eval_error(
            "negative number cannot be raised to a fractional power",
        ));
    }
    let value = b.powf(e);
    if value.is_infinite() && b.is_finite() && e.is_finite() {
        return Err(eval_error("numerical result out of range"));
    }
    Ok(Number::Float(value))
}

/// Exact power for a non-negative integer exponent
fn int_pow(base: &BigInt, exponent: &BigInt) -> Result<Number, CalcError> {
    // 0, 1 and -1 stay small for any exponent; only the parity matters.
    if base.bits() <= 1 {
        let reduced: u32 = if exponent.is_zero() {
            0
        } else if (exponent % 2u32).is_zero() {
            2
        } else {
            1
        };
        return Ok(Number::Int(base.pow(reduced)));
    }

    let exponent = exponent
        .to_u32()
        .filter(|e| (base.bits() - 1).saturating_mul(u64::from(*e)) <= MAX_INT_BITS)
        .ok_or_else(too_large)?;
    bounded(base.pow(exponent))
}

fn neg(value: Number) -> Result<Number, CalcError> {
    match value {
        Number::Int(v) => Ok(Number::Int(-v)),
        Number::Float(v) => Ok(Number::Float(-v)),
    }
}

/// A calculator tool for evaluating arithmetic expressions
pub struct MathTool;

#[async_trait]
impl AiTool for MathTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluates arithmetic expressions with + - * / ** // and parentheses"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, params: Value) -> Result<Value, Error> {
        self.validate_params(&params)?;

        let expression = params["expression"]
            .as_str()
            .ok_or_else(|| anyhow!("Missing 'expression' parameter"))?;

        let result = calculate(expression).map_err(|e| anyhow!(e.to_string()))?;
        if !result.is_finite() {
            return Err(anyhow!("Error: result {} is not a finite number", result));
        }
        Ok(serde_json::to_value(result)?)
    }

    fn validate_params(&self, params: &Value) -> Result<(), Error> {
        if !params.is_object() {
            return Err(anyhow!("Parameters must be an object"));
        }

        if !params.get("expression").is_some_and(|v| v.is_string()) {
            return Err(anyhow!("Missing or invalid 'expression' parameter"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval_err(expr: &str) -> String {
        calculate(expr).unwrap_err().to_string()
    }

    #[test]
    fn test_precedence_and_division() {
        assert_eq!(calculate("2+2*3").unwrap(), Number::from(8));
        assert_eq!(calculate("(5-1)/2").unwrap(), Number::Float(2.0));
        assert_eq!(calculate("(5-1)/2").unwrap().to_string(), "2.0");
        assert_eq!(calculate("10 - 4 - 3").unwrap(), Number::from(3));
        assert_eq!(calculate("100 / 10 / 5").unwrap(), Number::Float(2.0));
        assert_eq!(calculate("(2 + 3) * 4").unwrap(), Number::from(20));
        assert_eq!(calculate("1/3").unwrap().to_string(), "0.3333333333333333");
    }

    #[test]
    fn test_unary_and_power() {
        assert_eq!(calculate("-5 + 3").unwrap(), Number::from(-2));
        assert_eq!(calculate("2 + + 3").unwrap(), Number::from(5));
        assert_eq!(calculate("--4").unwrap(), Number::from(4));
        assert_eq!(calculate("-2**2").unwrap(), Number::from(-4));
        assert_eq!(calculate("2**3**2").unwrap(), Number::from(512));
        assert_eq!(calculate("2**-1").unwrap(), Number::Float(0.5));
        assert_eq!(calculate("7 // 2").unwrap(), Number::from(3));
        assert_eq!(calculate("-7 // 2").unwrap(), Number::from(-4));
        assert_eq!(calculate("7.5 // 2").unwrap(), Number::Float(3.0));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(calculate("3.14 * 2").unwrap().to_string(), "6.28");
        assert_eq!(calculate(".5 + 2.").unwrap(), Number::Float(2.5));
        assert_eq!(calculate("0 * 100").unwrap(), Number::from(0));
        assert_eq!(calculate("00 + 1").unwrap(), Number::from(1));
        assert!(eval_err("007").starts_with("Error: leading zeros"));
        assert_eq!(eval_err("1.2.3"), "Error: invalid syntax");
        assert_eq!(eval_err("."), "Error: invalid syntax");
    }

    #[test]
    fn test_rejects_non_arithmetic_characters() {
        for expr in ["import os", "__import__('os')", "2 + x", "2 % 3", "", "2^3", "1,000"] {
            assert_eq!(calculate(expr), Err(CalcError::InvalidCharacters), "{:?}", expr);
        }
        assert_eq!(eval_err("import os"), "Invalid characters in expression.");
    }

    #[test]
    fn test_evaluation_errors_are_reported_as_text() {
        assert_eq!(eval_err("1/0"), "Error: division by zero");
        assert_eq!(eval_err("1.5/0.0"), "Error: division by zero");
        assert_eq!(eval_err("1//0"), "Error: integer division or modulo by zero");
        assert_eq!(eval_err("0**-1"), "Error: 0.0 cannot be raised to a negative power");
        assert_eq!(eval_err("   "), "Error: empty expression");
        assert_eq!(eval_err("2 +"), "Error: invalid syntax");
        assert_eq!(eval_err("2 3"), "Error: invalid syntax");
        assert_eq!(eval_err("(2 + 3"), "Error: '(' was never closed");
        assert_eq!(eval_err("2 + 3)"), "Error: invalid syntax");
        assert_eq!(eval_err("()"), "Error: unmatched ')'");
    }

    #[test]
    fn test_integers_are_exact_beyond_64_bits() {
        assert_eq!(
            calculate("99999999999*99999999999").unwrap().to_string(),
            "9999999999800000000001"
        );
        assert_eq!(calculate("2**64").unwrap().to_string(), "18446744073709551616");
        assert_eq!(
            calculate("12345678901234567890 + 1").unwrap().to_string(),
            "12345678901234567891"
        );
        assert_eq!(
            calculate("9223372036854775807 + 1").unwrap().to_string(),
            "9223372036854775808"
        );
        assert_eq!(calculate("-2**63 - 1").unwrap().to_string(), "-9223372036854775809");
        assert_eq!(calculate("-(2**64) // 3").unwrap().to_string(), "-6148914691236517206");
        assert_eq!(calculate("2**64 / 2").unwrap(), Number::Float(9223372036854775808.0));
        assert_eq!(calculate("(-1)**100001").unwrap(), Number::from(-1));
        assert_eq!(calculate("1**99999999999999999999").unwrap(), Number::from(1));
    }

    #[test]
    fn test_integer_size_limit() {
        assert_eq!(
            eval_err("2**100000"),
            "Error: integer result exceeds the limit of 4300 digits"
        );
        let literal = "9".repeat(4301);
        assert_eq!(
            eval_err(&literal),
            "Error: integer literal exceeds the limit of 4300 digits"
        );
        assert_eq!(
            eval_err(&format!("{} * 1.5", "9".repeat(400))),
            "Error: int too large to convert to float"
        );
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(calculate("\t2 +\x0c2 ").unwrap(), Number::from(4));
        assert_eq!(calculate("2 + 2\n").unwrap(), Number::from(4));
        assert_eq!(calculate("\n2 + 2").unwrap(), Number::from(4));
        assert_eq!(calculate("(2\n+ 2)").unwrap(), Number::from(4));
        assert_eq!(eval_err("2\n+2"), "Error: invalid syntax");
        assert_eq!(
            eval_err("2\u{a0}+ 2"),
            "Error: invalid non-printable character U+00A0"
        );
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let expr = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(eval_err(&expr), "Error: expression is too deeply nested");

        let expr = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(calculate(&expr).unwrap(), Number::from(1));
    }

    #[tokio::test]
    async fn test_math_tool() {
        let tool = MathTool;

        let result = tool.execute(json!({"expression": "2 + 3 * 4"})).await.unwrap();
        assert_eq!(result, json!(14));

        let result = tool.execute(json!({"expression": "15 / 3"})).await.unwrap();
        assert_eq!(result.as_f64().unwrap(), 5.0);

        let err = tool.execute(json!({"expression": "5 / 0"})).await.unwrap_err();
        assert_eq!(err.to_string(), "Error: division by zero");

        let err = tool.execute(json!({"expression": "rm -rf"})).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid characters in expression.");

        let result = tool.execute(json!({"expression": "2**64"})).await.unwrap();
        assert_eq!(result, json!(18446744073709551616.0_f64));
    }

    #[tokio::test]
    async fn test_math_tool_rejects_non_finite_results() {
        let tool = MathTool;
        let overflowing = format!("1{}.0", "0".repeat(400));
        assert_eq!(calculate(&overflowing).unwrap(), Number::Float(f64::INFINITY));

        let err = tool
            .execute(json!({"expression": overflowing}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: result inf is not a finite number");
    }

    #[tokio::test]
    async fn test_parameter_validation() {
        let tool = MathTool;

        assert!(tool.execute(json!({})).await.is_err());
        assert!(tool.execute(json!({"expression": 123})).await.is_err());
        assert!(tool.execute(json!("2 + 2")).await.is_err());

        let result = tool
            .execute(json!({"expression": "2 + 2", "extra_param": "ignored"}))
            .await
            .unwrap();
        assert_eq!(result, json!(4));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = MathTool;

        assert_eq!(tool.name(), "calculator");
        assert!(!tool.description().is_empty());

        let schema = tool.schema();
        assert!(schema["type"].as_str() == Some("object"));
        assert!(schema["properties"]["expression"].is_object());
        assert!(schema["required"].as_array().unwrap().contains(&json!("expression")));
    }
}
