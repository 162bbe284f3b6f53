use toylang::{
    ast::Statement,
    interpreter::{
        evaluator::core::Evaluator,
        lexer::{TokenKind, tokenize},
    },
};

#[test]
fn token_positions_are_monotone() {
    let tokens = tokenize("let x = 10;\nx += 1; # trailing comment\necho x;");
    let positions: Vec<(usize, usize)> = tokens
        .iter()
        .map(|token| (token.position.line, token.position.column))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert_eq!(positions[0], (1, 1));
    assert_eq!(positions[5], (2, 1));
}

#[test]
fn words_are_reclassified() {
    let tokens = tokenize("let div foo or not");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, vec![
        TokenKind::Keyword,
        TokenKind::Operator,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Operator,
        TokenKind::EndOfFile,
    ]);
}

#[test]
fn lone_bang_is_illegal() {
    let tokens = tokenize("!");
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].value, "!");
}

#[test]
fn bang_equal_is_one_operator() {
    let tokens = tokenize("a != b");
    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].value, "!=");
    assert_eq!(tokens.len(), 4);
}

#[test]
fn operators_are_greedy() {
    let tokens = tokenize("a += b == c ^= d");
    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["a", "+=", "b", "==", "c", "^=", "d", ""]);
}

#[test]
fn number_forms() {
    let tokens = tokenize("0 1. 3.25");
    assert!(tokens[..3].iter().all(|token| token.kind == TokenKind::Number));
    assert_eq!(tokens[1].value, "1.");
    toylang::run_script("assert(1. == 1); assert(0 == 0.0);", "test").unwrap();
}

#[test]
fn string_escapes_are_decoded() {
    let tokens = tokenize(r#""a\nb\t\"\\c" 'don\'t'"#);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].value, "a\nb\t\"\\c");
    assert_eq!(tokens[1].kind, TokenKind::Str);
    assert_eq!(tokens[1].value, "don't");
}

#[test]
fn unterminated_string_is_illegal() {
    let tokens = tokenize("\"abc");
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert!(tokens[0].value.starts_with("abc"));
    assert!(tokens[0].value.contains("never closed"));
}

#[test]
fn comments_are_skipped() {
    let tokens = tokenize("1 # everything after the hash\n2");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].value, "2");
    assert_eq!(tokens[1].position.line, 2);
}

#[test]
fn recovery_collects_reports_and_keeps_parsing() {
    let (program, errors) = toylang::parse("let ; let b = 1; assert(b == 1);");
    assert!(!errors.is_empty());
    assert!(errors[0]
        .to_string()
        .starts_with("While parsing variable declaration (line 1, column 1):"));
    assert_eq!(program.statements.len(), 3);
    assert!(matches!(program.statements[0], Statement::Illegal { .. }));

    // a caller that filters the placeholders can still run the rest
    let mut evaluator = Evaluator::new("test");
    for statement in &program.statements {
        if matches!(statement, Statement::Illegal { .. }) {
            continue;
        }
        evaluator.execute_statement(statement).unwrap();
    }
}

#[test]
fn executing_a_placeholder_is_fatal() {
    let (program, errors) = toylang::parse("let ;");
    assert!(!errors.is_empty());
    let fatal = toylang::evaluate(&program, "test").unwrap();
    assert!(fatal.contains("Cannot execute an error node"));
}

#[test]
fn recovery_synchronizes_on_punctuation() {
    // the broken statement swallows tokens up to the next punctuation,
    // then parsing resumes cleanly
    let (program, errors) = toylang::parse("let 5 = x; echo 1;");
    assert_eq!(errors.len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[1], Statement::Echo { .. }));
}

#[test]
fn a_clean_parse_has_no_placeholders() {
    let source = "fun visit(tree, f) {\n\
                  for (i from 0 to size(tree)) { f(tree[i]); }\n\
                  }\n\
                  let total = 0;\n\
                  visit([1, 2, 3], lambda (x) { total += x; });\n\
                  assert(total == 6);";
    let (_, errors) = toylang::parse(source);
    assert!(errors.is_empty());
    toylang::run_script(source, "test").unwrap();
}

fn formatted(source: &str) -> String {
    let (program, errors) = toylang::parse(source);
    assert!(errors.is_empty(), "unexpected parse errors in {source}: {errors:?}");
    toylang::format(&program)
}

#[test]
fn formatting_is_idempotent() {
    let sources = [
        "let x=1+2 ;",
        "if(x>1){y=2;}else{y=3;}",
        "fun f (a,b=2) {return a+b;}",
        "for(i from 0 to 10 step 2){echo i;}",
        "while (not done) { done = advance(); }",
        "let o={\"a\":1,2:\"b\"};let a=[1,[2,3]];",
        "let f=lambda(x){return x;};",
        "import helpers as h;",
        "a[0]=f(1,2)[3];",
    ];
    for source in sources {
        let first = formatted(source);
        let second = formatted(&first);
        assert_eq!(first, second, "formatting changed on the second pass for {source}");
    }
}

#[test]
fn formatting_preserves_expression_shape() {
    assert_eq!(formatted("1 + 2 * 3;"), "1 + 2 * 3;\n");
    assert_eq!(formatted("(1 + 2) * 3;"), "(1 + 2) * 3;\n");
    assert_eq!(formatted("2 ^ 3 ^ 2;"), "2 ^ 3 ^ 2;\n");
    assert_eq!(formatted("(2 ^ 3) ^ 2;"), "(2 ^ 3) ^ 2;\n");
    assert_eq!(formatted("1 - 2 - 3;"), "1 - 2 - 3;\n");
    assert_eq!(formatted("1 - (2 - 3);"), "1 - (2 - 3);\n");
    assert_eq!(formatted("-(1 + 2);"), "-(1 + 2);\n");
    assert_eq!(formatted("not (a == b);"), "not (a == b);\n");
}

#[test]
fn formatting_canonicalizes_strings_and_blocks() {
    assert_eq!(formatted("let s = 'a\\nb';"), "let s = \"a\\nb\";\n");
    assert_eq!(
        formatted("if (x) { y = 1; }"),
        "if (x) {\n    y = 1;\n}\n"
    );
    assert_eq!(
        formatted("fun f(a){return a;}"),
        "fun f (a) {\n    return a;\n}\n"
    );
}

#[test]
fn formatted_programs_reparse_to_the_same_shape() {
    let sources = [
        "let x = 1 + 2 * 3 ^ 2;",
        "fun fact(n) { if (n < 2) return 1; return n * fact(n - 1); }",
        "let o = {\"a\": [1, 2], \"b\": lambda () { return nil; }};",
        "for (i from 10 to 0 step -2) { echo i; } while (true) { break; }",
    ];
    for source in sources {
        let (first_program, _) = toylang::parse(source);
        let first = toylang::format(&first_program);
        let (second_program, errors) = toylang::parse(&first);
        assert!(errors.is_empty());
        assert_eq!(toylang::format(&second_program), first);
    }
}
