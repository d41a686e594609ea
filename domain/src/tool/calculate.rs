//! `calculate`: evaluate a simple arithmetic expression.
//!
//! Grammar (recursive descent, usual precedence, left associative):
//!
//! ```text
//! expr   := term   (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use super::entities::{ToolDefinition, ToolParameter};
use super::traits::{AirlineTool, parse_args};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::AirlineData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CALCULATE: &str = "calculate";

const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Deepest allowed nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 200;

/// Magnitude from which results switch to exponent notation (`1e+16`).
const EXPONENT_THRESHOLD: f64 = 1e16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateArgs {
    pub expression: String,
}

/// Evaluate `expression`, rounded to two decimals.
pub fn calculate(_data: &AirlineData, args: &CalculateArgs) -> ToolOutcome {
    if !args.expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
        return Err(ToolError::InvalidExpression);
    }
    let value = round2(evaluate(&args.expression)?);
    if !value.is_finite() {
        return Err(ToolError::Calculation("numerical result out of range".into()));
    }
    Ok(format_number(value))
}

fn round2(value: f64) -> f64 {
    // Already whole, and scaling could overflow
    if value.abs() >= EXPONENT_THRESHOLD {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Whole results keep one decimal place (`150.0`), others print as is.
/// Large magnitudes use a signed exponent (`1.5e+17`).
fn format_number(value: f64) -> String {
    // -0.0 prints as 0.0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.abs() >= EXPONENT_THRESHOLD {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent:0>2}")
            }
            _ => formatted,
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn evaluate(expression: &str) -> Result<f64, ToolError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(malformed());
    }
    Ok(value)
}

fn malformed() -> ToolError {
    ToolError::Calculation("invalid syntax".into())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
    Open,
    Close,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                tokens.push(Token::Op(c));
            }
            _ => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let number = literal.parse::<f64>().map_err(|_| malformed())?;
                tokens.push(Token::Number(number));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.factor()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ToolError::Calculation("division by zero".into()));
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ToolError> {
        if self.depth >= MAX_DEPTH {
            return Err(ToolError::Calculation("too many nested parentheses".into()));
        }
        self.depth += 1;
        let value = self.nested_factor();
        self.depth -= 1;
        value
    }

    fn nested_factor(&mut self) -> Result<f64, ToolError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Op('-')) => Ok(-self.factor()?),
            Some(Token::Op('+')) => self.factor(),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(malformed()),
                }
            }
            _ => Err(malformed()),
        }
    }
}

pub struct Calculate;

impl AirlineTool for Calculate {
    fn name(&self) -> &'static str {
        CALCULATE
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CALCULATE,
            "Calculate the result of a mathematical expression.",
        )
        .with_parameter(ToolParameter::new(
            "expression",
            "The mathematical expression to calculate, such as '2 + 2'. The expression can contain numbers, operators (+, -, *, /), parentheses, and spaces.",
            true,
        ))
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        calculate(data, &parse_args(CALCULATE, kwargs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(expression: &str) -> ToolOutcome {
        calculate(
            &AirlineData::new(),
            &CalculateArgs {
                expression: expression.into(),
            },
        )
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(calc("2 + 3 * 4").unwrap(), "14.0");
        assert_eq!(calc("(2 + 3) * 4").unwrap(), "20.0");
        assert_eq!(calc("10 - 4 - 3").unwrap(), "3.0");
        assert_eq!(calc("-(5 - 8)").unwrap(), "3.0");
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(calc("10 / 3").unwrap(), "3.33");
        assert_eq!(calc("305 * 0.5").unwrap(), "152.5");
    }

    #[test]
    fn test_errors() {
        assert_eq!(calc("2 ** x"), Err(ToolError::InvalidExpression));
        assert_eq!(
            calc("1 / 0").unwrap_err().to_wire(),
            "Error: division by zero"
        );
        assert!(matches!(calc("(1 + 2"), Err(ToolError::Calculation(_))));
        assert!(matches!(calc("1 2"), Err(ToolError::Calculation(_))));
        assert!(matches!(calc("1..2"), Err(ToolError::Calculation(_))));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(
            calc(&nested).unwrap_err().to_wire(),
            "Error: too many nested parentheses"
        );

        let signs = format!("{}1", "-".repeat(20_000));
        assert!(matches!(calc(&signs), Err(ToolError::Calculation(_))));

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(calc(&shallow).unwrap(), "1.0");
    }

    #[test]
    fn test_edge_formatting() {
        assert_eq!(calc("0 * -1").unwrap(), "0.0");
        assert_eq!(calc("-0.001").unwrap(), "0.0");
        assert_eq!(calc("10000000000000000").unwrap(), "1e+16");
        assert_eq!(calc("150000000000000000").unwrap(), "1.5e+17");
        assert_eq!(calc("-3 * 2").unwrap(), "-6.0");
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(
            calc(&huge).unwrap_err().to_wire(),
            "Error: numerical result out of range"
        );
        let product = format!("1{z} * 1{z}", z = "0".repeat(200));
        assert!(matches!(calc(&product), Err(ToolError::Calculation(_))));

        let near_max = format!("17{}", "0".repeat(307));
        assert_eq!(calc(&near_max).unwrap(), "1.7e+308");
    }
}
