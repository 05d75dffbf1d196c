#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    // Whatever the input, the parser either produces a node or a diagnostic,
    // and a failed parse never moves the cursor
    let tokens = match curry::tokenize(input) {
        Ok(tokens) => tokens,
        Err(_) => return,
    };

    let mut parser = curry::Parser::new(tokens.clone());
    let node = parser.parse_program();
    if node.is_error() {
        assert_eq!(parser.position(), 0);
    } else {
        assert_eq!(parser.position(), tokens.len());
    }
});
