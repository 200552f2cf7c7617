//! Parsing of provisioner stdout into typed records.
//!
//! Provisioner output is free-form text written for humans. Everything we
//! read from it goes through here, and any deviation from the expected shape
//! is an error rather than a best guess.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::StackError;
use super::values::{Stack, StackId};

static STACK_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"stack_(\d+)").expect("stack id pattern is valid"));

/// Parses `list` output: one `<id> <payment_domain> <wallet_domain>` per line.
///
/// Blank lines are skipped. A line with any other token count fails the whole
/// listing; returning the well-formed remainder would hide provisioner bugs.
pub fn parse_directory(stdout: &str) -> Result<Vec<Stack>, StackError> {
    let mut stacks = Vec::new();

    for (index, line) in stdout.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [id, payment_domain, wallet_domain] => {
                let id = StackId::new(*id).map_err(|e| {
                    StackError::output_parsing(format!("line {}: {}", index + 1, e))
                })?;
                stacks.push(Stack::new(id, *payment_domain, *wallet_domain));
            }
            other => {
                return Err(StackError::output_parsing(format!(
                    "line {}: expected 3 fields (id, payment domain, wallet domain), found {}: {:?}",
                    index + 1,
                    other.len(),
                    line
                )));
            }
        }
    }

    Ok(stacks)
}

/// Finds the id of a freshly added stack in `add` output (`stack_<digits>`).
pub fn extract_stack_id(stdout: &str) -> Option<StackId> {
    STACK_ID_PATTERN
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| StackId::new(digits.as_str()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_single_stack() {
        let stacks = parse_directory("7 pay.example.com wallet.example.com\n").unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].id.as_str(), "7");
        assert_eq!(stacks[0].payment_domain, "pay.example.com");
        assert_eq!(stacks[0].wallet_domain, "wallet.example.com");
    }

    #[test]
    fn empty_output_is_empty_directory() {
        assert!(parse_directory("").unwrap().is_empty());
        assert!(parse_directory("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn skips_blank_lines_between_records() {
        let out = "1 a.example.com b.example.com\n\n2 c.example.com d.example.com\n";
        let stacks = parse_directory(out).unwrap();
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[1].id.as_str(), "2");
    }

    #[test]
    fn tolerates_extra_spacing_and_crlf() {
        let out = "  3\tpay.example.com   wallet.example.com  \r\n";
        let stacks = parse_directory(out).unwrap();
        assert_eq!(stacks[0].id.as_str(), "3");
        assert_eq!(stacks[0].wallet_domain, "wallet.example.com");
    }

    #[test]
    fn malformed_line_fails_whole_listing() {
        let out = "1 a.example.com b.example.com\nNo stacks configured yet\n";
        let err = parse_directory(out).unwrap_err();
        match err {
            StackError::OutputParsing(message) => assert!(message.starts_with("line 2:")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn short_line_is_malformed() {
        assert!(matches!(
            parse_directory("1 a.example.com\n"),
            Err(StackError::OutputParsing(_))
        ));
    }

    #[test]
    fn extracts_id_from_surrounding_text() {
        let out = "Creating containers...\nStack stack_42 created successfully\n";
        assert_eq!(extract_stack_id(out).unwrap().as_str(), "42");
    }

    #[test]
    fn extracts_first_id_when_several_present() {
        let out = "stack_3 exists, created stack_4";
        assert_eq!(extract_stack_id(out).unwrap().as_str(), "3");
    }

    #[test]
    fn missing_id_yields_none() {
        assert!(extract_stack_id("Stack created\n").is_none());
        assert!(extract_stack_id("stack_ without digits").is_none());
    }

    fn domain() -> impl Strategy<Value = String> {
        "[a-z]{1,10}\\.[a-z]{2,5}"
    }

    proptest! {
        #[test]
        fn parses_every_well_formed_line_in_order(
            rows in proptest::collection::vec(("[0-9]{1,5}", domain(), domain()), 0..20)
        ) {
            let out: String = rows
                .iter()
                .map(|(id, p, w)| format!("{} {} {}\n", id, p, w))
                .collect();

            let stacks = parse_directory(&out).unwrap();

            prop_assert_eq!(stacks.len(), rows.len());
            for (stack, (id, p, w)) in stacks.iter().zip(rows.iter()) {
                prop_assert_eq!(stack.id.as_str(), id.as_str());
                prop_assert_eq!(&stack.payment_domain, p);
                prop_assert_eq!(&stack.wallet_domain, w);
            }
        }

        #[test]
        fn extracts_any_embedded_id(prefix in "[A-Za-z .]{0,20}", digits in "[0-9]{1,9}") {
            let out = format!("{}stack_{}\n", prefix, digits);
            let id = extract_stack_id(&out).unwrap();
            prop_assert_eq!(id.as_str(), digits.as_str());
        }
    }
}
