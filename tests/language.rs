use std::fs;

use toylang::run_script;

fn assert_success(source: &str) {
    if let Err(error) = run_script(source, "test") {
        panic!("Script failed: {error}\nScript:\n{source}");
    }
}

fn assert_failure(source: &str) {
    if run_script(source, "test").is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}");
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("let a = 1; let b = 2; let c = a + b; assert(c == 3);");
    assert_success("let x = 7 * 9; assert(x == 63);");
    assert_success("let x = 8 - 5; assert(x == 3);");
    assert_success("let x = 10 / 4; assert(x == 2.5);");
    assert_success("let x; assert(x == nil); x = 4; assert(x == 4);");
}

#[test]
fn integer_division_and_modulo() {
    assert_success("assert(7 div 2 == 3);");
    assert_success("assert(-7 div 2 == -3);");
    assert_success("assert(7 mod 3 == 1);");
    assert_success("assert(7.5 mod 2 == 1.5);");
}

#[test]
fn power_is_right_associative() {
    assert_success("assert(2 ^ 3 ^ 2 == 512);");
    assert_success("assert((2 ^ 3) ^ 2 == 64);");
    assert_success("assert(2 ^ -1 == 0.5);");
}

#[test]
fn operator_precedence() {
    assert_success("assert(1 + 2 * 3 == 7);");
    assert_success("assert((1 + 2) * 3 == 9);");
    assert_success("assert(1 + 1 == 2 and 2 < 3);");
    assert_success("assert(not false == true);");
}

#[test]
fn compound_assignments() {
    assert_success("let x = 2; x += 3; assert(x == 5);");
    assert_success("let x = 7; x -= 2; assert(x == 5);");
    assert_success("let x = 4; x *= 2; assert(x == 8);");
    assert_success("let x = 9; x /= 3; assert(x == 3);");
    assert_success("let x = 2; x ^= 3; assert(x == 8);");
}

#[test]
fn string_operations() {
    assert_success(r#"assert("foo" + "bar" == "foobar");"#);
    assert_success(r#"assert("ab" + 1 == "ab1");"#);
    assert_success(r#"assert("ab" * 3 == "ababab");"#);
    assert_success(r#"let s = "x"; s += "y"; assert(s == "xy");"#);
    assert_success(r#"let s = "ab"; s *= 2; assert(s == "abab");"#);
    assert_success(r#"assert("abc" < "abd"); assert("b" > "a");"#);
    assert_failure(r#""a" - "b";"#);
}

#[test]
fn logic_evaluates_both_sides() {
    assert_success(
        "let n = 0;\n\
         fun bump() { n += 1; return true; }\n\
         let r = false and bump();\n\
         assert(r == false);\n\
         assert(n == 1);",
    );
    assert_success("assert(true or false); assert(not (false or false));");
    assert_failure("1 and true;");
}

#[test]
fn if_else_and_blocks() {
    assert_success("let x = 0; if (true) { x = 1; } assert(x == 1);");
    assert_success("let x = 0; if (false) { x = 1; } else { x = 2; } assert(x == 2);");
    // a dangling else binds to the nearest if
    assert_success(
        "let x = 0;\n\
         if (true) if (false) x = 1; else x = 2;\n\
         assert(x == 2);",
    );
    assert_failure("if (1) { }");
}

#[test]
fn blocks_scope_their_declarations() {
    assert_success("let a = 1; { let a = 2; assert(a == 2); } assert(a == 1);");
    assert_success("let a = 1; { a = 2; } assert(a == 2);");
    assert_failure("{ let inner = 1; } inner;");
}

#[test]
fn while_loops() {
    assert_success(
        "let n = 0; let total = 0;\n\
         while (n < 5) { n += 1; total += n; }\n\
         assert(total == 15);",
    );
    assert_success(
        "let n = 0;\n\
         while (true) { n += 1; if (n == 3) break; }\n\
         assert(n == 3);",
    );
    assert_success(
        "let n = 0; let odd = 0;\n\
         while (n < 6) { n += 1; if (n mod 2 == 0) continue; odd += 1; }\n\
         assert(odd == 3);",
    );
    assert_failure("while (1) { }");
}

#[test]
fn for_loops_are_half_open() {
    assert_success("let n = 0; for (i from 0 to 5) n += 1; assert(n == 5);");
    assert_success("let n = 0; for (i from 0 to 0) n += 1; assert(n == 0);");
    assert_success("let last = nil; for (i from 0 to 5) last = i; assert(last == 4);");
    assert_success("let n = 0; for (i from 5 to 0 step -1) n += 1; assert(n == 5);");
    assert_success("let n = 0; for (i from 0 to 10 step 3) n += 1; assert(n == 4);");
}

#[test]
fn for_loop_flow_operators() {
    assert_success(
        "let n = 0;\n\
         for (i from 0 to 10) { if (i == 4) break; n += 1; }\n\
         assert(n == 4);",
    );
    assert_success(
        "let n = 0;\n\
         for (i from 0 to 4) { if (i == 2) continue; n += 1; }\n\
         assert(n == 3);",
    );
}

#[test]
fn for_loop_step_validation() {
    assert_failure("for (i from 0 to 5 step 0) { }");
    assert_failure("for (i from 0 to 5 step -1) { }");
    assert_failure("for (i from 5 to 0 step 1) { }");
    assert_failure("for (i from true to 5) { }");
}

#[test]
fn functions_and_recursion() {
    assert_success(
        "fun fact(n) { if (n < 2) return 1; return n * fact(n - 1); }\n\
         assert(fact(6) == 720);",
    );
    assert_success("fun nothing() { } assert(nothing() == nil);");
    assert_success("fun early() { return; } assert(early() == nil);");
}

#[test]
fn closures_share_their_creation_scope() {
    assert_success(
        "fun mk() { let i = 0; return lambda() { i += 1; return i; }; }\n\
         let c = mk();\n\
         assert(c() == 1);\n\
         assert(c() == 2);\n\
         assert(c() == 3);\n\
         let d = mk();\n\
         assert(d() == 1);\n\
         assert(c() == 4);",
    );
}

#[test]
fn default_parameters() {
    assert_success(
        "fun g(a, b = 10) { return a + b; }\n\
         assert(g(1) == 11);\n\
         assert(g(1, 2) == 3);",
    );
    assert_success(
        "fun h(a = 1, b = 2) { return a * 10 + b; }\n\
         assert(h() == 12);\n\
         assert(h(5) == 52);\n\
         assert(h(5, 6) == 56);",
    );
}

#[test]
fn parameter_binding_failures() {
    assert_failure("fun f(a) { } f(1, 2);");
    assert_failure("fun f(a, b) { return a; } f(1);");
    assert_failure("fun f(a, a) { } f(1, 1);");
    assert_failure("fun f(1) { } f(1);");
    assert_failure("let v = 3; v();");
}

#[test]
fn lambdas_are_first_class() {
    assert_success("let twice = lambda (x) { return x * 2; }; assert(twice(21) == 42);");
    assert_success(
        "fun apply(f, x) { return f(x); }\n\
         assert(apply(lambda (n) { return n + 1; }, 41) == 42);",
    );
    assert_success("assert(typeof(lambda () { }) == \"function\");");
}

#[test]
fn arrays_are_shared_references() {
    assert_success(
        "let a = [1, 2]; let b = a;\n\
         b += 3;\n\
         assert(size(a) == 3);\n\
         assert(a[2] == 3);\n\
         assert(a == b);",
    );
}

#[test]
fn scalars_are_copied_on_assignment() {
    assert_success("let x = 5; let y = x; y += 1; assert(x == 5); assert(y == 6);");
    assert_success(
        "let s = \"a\"; let t = s; t += \"b\"; assert(s == \"a\"); assert(t == \"ab\");",
    );
}

#[test]
fn array_operators() {
    // + appends a single element and builds a new array
    assert_success(
        "let a = [1, 2]; let b = a + 3;\n\
         assert(size(a) == 2);\n\
         assert(b == [1, 2, 3]);",
    );
    // even when the element is itself an array
    assert_success("let n = [1] + [2]; assert(size(n) == 2); assert(n[1] == [2]);");
    assert_success("assert([1, 2, 1, 3] - 1 == [2, 3]);");
    assert_success("assert([1, 2] * 2 == [1, 2, 1, 2]);");
    assert_success("let a = [1]; a -= 1; assert(a == []);");
    assert_success("let a = [1, 2]; a *= 2; assert(size(a) == 4);");
    assert_failure("[1] / 2;");
}

#[test]
fn array_equality_is_deep() {
    assert_success("assert([1, [2, 3]] == [1, [2, 3]]);");
    assert_success("assert(not ([1, 2] == [1, 3]));");
    assert_success("assert(not ([1] == [1, 2]));");
    assert_success("assert([1] != 1);");
}

#[test]
fn array_indexing() {
    assert_success("let a = [10, 20, 30]; assert(a[0] == 10); assert(a[2] == 30);");
    assert_success("let a = [1, 2]; a[1] = 9; assert(a == [1, 9]);");
    assert_success("let a = [[1, 2], [3, 4]]; assert(a[1][0] == 3);");
    assert_failure("[1, 2][0.5];");
    assert_failure("[1, 2][-1];");
    assert_failure("[1, 2][2];");
    assert_failure("5[0];");
    assert_failure("nil[0];");
}

#[test]
fn objects_and_identity() {
    assert_success(
        "let o = {\"a\": 1, \"b\": 2};\n\
         assert(o[\"a\"] == 1);\n\
         o[\"c\"] = 3;\n\
         assert(o[\"c\"] == 3);\n\
         assert(o[\"missing\"] == nil);",
    );
    // a repeated literal key keeps the last value
    assert_success("let o = {\"k\": 1, \"k\": 2}; assert(o[\"k\"] == 2);");
    // keys are converted to strings at construction time
    assert_success("let o = {1 + 1: \"two\"}; assert(o[\"2\"] == \"two\"); assert(o[2] == \"two\");");
    // object equality is identity, not structure
    assert_success("let p = {}; let q = {}; assert(not (p == q)); let r = p; assert(r == p);");
    // objects are shared references
    assert_success("let p = {}; let q = p; q[\"x\"] = 1; assert(p[\"x\"] == 1);");
}

#[test]
fn object_builtins() {
    assert_success(
        "let o = {\"b\": 2, \"a\": 1};\n\
         let k = keys(o);\n\
         assert(size(k) == 2);\n\
         assert(k[0] == \"a\");\n\
         assert(sum(values(o)) == 3);",
    );
    assert_failure("keys([1, 2]);");
}

#[test]
fn assignment_targets() {
    assert_failure("1 = 2;");
    assert_failure("(1 + 2) = 3;");
    assert_failure("missing = 1;");
    assert_failure("let a = 1; let a = 2;");
}

#[test]
fn misplaced_flow_operators() {
    assert_failure("break;");
    assert_failure("continue;");
    assert_failure("return 1;");
    assert_failure("fun f() { break; } f();");
    assert_failure("fun f() { continue; } f();");
}

#[test]
fn numeric_builtins() {
    assert_success("assert(abs(-3) == 3); assert(abs(3) == 3);");
    assert_success("assert(round(3.7) == 4); assert(round(-1.2) == -1);");
    assert_success("assert(trunc(3.9) == 3); assert(trunc(-3.9) == -3);");
    assert_success("assert(PI > 3.14 and PI < 3.15);");
    assert_success("assert(EXP > 2.7 and EXP < 2.72);");
    assert_failure("abs(\"x\");");
    assert_failure("abs(1, 2);");
}

#[test]
fn array_builtins() {
    assert_success("assert(size([1, 2, 3]) == 3); assert(size([]) == 0);");
    assert_success("assert(sum([1, 2, 3]) == 6);");
    assert_success("assert(sum([\"a\", \"b\"]) == \"ab\");");
    assert_success("assert(max([3, 1, 2]) == 3); assert(min([3, 1, 2]) == 1);");
    assert_success("assert(sum([]) == nil); assert(max([]) == nil); assert(min([]) == nil);");
    assert_success("assert(all([true, true])); assert(not all([true, false]));");
    assert_success("assert(any([false, true])); assert(not any([false, false]));");
    assert_success("assert(all([])); assert(not any([]));");
    assert_success("let a = array(1, 2, 3); assert(a == [1, 2, 3]);");
    assert_failure("all([1]);");
    assert_failure("size(5);");
}

#[test]
fn slice_and_reversed_and_range() {
    assert_success("let a = [1, 2, 3, 4]; assert(slice(a, 1, 3) == [2, 3]);");
    assert_success("let a = [1, 2]; assert(slice(a, 0, size(a)) == a);");
    assert_success("assert(slice([1, 2], 0, 99) == [1, 2]);");
    assert_success("assert(slice([1, 2], -1, 2) == nil);");
    assert_success("assert(reversed([1, 2, 3]) == [3, 2, 1]);");
    assert_success("let a = [1, 2, 3]; assert(reversed(reversed(a)) == a);");
    assert_success("assert(size(range(0, 5, 1)) == 5);");
    assert_success("assert(range(0, 5, 1)[4] == 4);");
    assert_success("assert(size(range(5, 0, -1)) == 5);");
    assert_success("assert(range(0, 5, -1) == nil);");
    assert_success("assert(range(5, 0, 1) == nil);");
}

#[test]
fn string_builtins() {
    assert_success("let c = chars(\"abc\"); assert(size(c) == 3); assert(c[0] == \"a\");");
    assert_success("assert(chars(\"\") == []);");
    assert_failure("chars(5);");
}

#[test]
fn coercion_builtins() {
    assert_success("assert(bool(nil) == false);");
    assert_success("assert(bool(1) == true); assert(bool(2) == false);");
    assert_success("assert(bool(\"\") == false); assert(bool(\"x\") == true);");
    assert_success("assert(bool([]) == false); assert(bool([1]) == true);");
    assert_success("assert(bool({}) == true); assert(bool(print) == true);");
    assert_success("assert(number(\"3.5\") == 3.5);");
    assert_success("assert(number(\"junk\") == nil); assert(number([]) == nil);");
    assert_success("assert(number(true) == 1); assert(number(false) == 0);");
    assert_success("assert(str(12) == \"12\"); assert(str(1.5) == \"1.5\");");
    assert_success("assert(str(nil) == \"nil\"); assert(str(true) == \"true\");");
    assert_success("assert(str([1, 2]) == \"[1, 2]\");");
    assert_success("assert(str({\"a\": 1}) == \"{a: 1}\");");
    assert_success("assert(typeof(nil) == \"nil\"); assert(typeof(1) == \"number\");");
    assert_success("assert(typeof([]) == \"array\"); assert(typeof({}) == \"object\");");
    assert_success("assert(typeof(typeof) == \"builtin\");");
    assert_success("fun f() { } assert(typeof(f) == \"function\");");
}

#[test]
fn random_builtins() {
    assert_success(
        "let x = rand(0, 1);\n\
         assert(x >= 0 and x < 1);",
    );
    assert_success(
        "let n = randint(1, 6);\n\
         assert(n >= 1 and n <= 6);\n\
         assert(trunc(n) == n);",
    );
    assert_success("assert(randint(0.6, 0.4) == nil);");
}

#[test]
fn undefined_and_wrong_type_failures() {
    assert_failure("missing;");
    assert_failure("assert(foo == 1);");
    assert_failure("-\"text\";");
    assert_failure("not 1;");
    assert_failure("nil + 1;");
    assert_failure("true < false;");
    assert_failure("assert(false);");
    assert_failure("assert(1);");
}

#[test]
fn runtime_errors_carry_position_chains() {
    let error = run_script("let boom = 1 + nil;", "test").unwrap_err();
    let description = error.to_string();
    assert!(description.contains("variable declaration at (line 1, column 1)"));
    assert!(description.contains("binary operation"));
    assert!(description.contains("not supported between"));
}

#[test]
fn call_failures_name_the_defining_file() {
    let error = run_script("fun f() { return missing; } f();", "test").unwrap_err();
    let description = error.to_string();
    assert!(description.contains("calling a function from file test"));
    assert!(description.contains("'missing' has not been defined yet"));
}

#[test]
fn imports_bind_module_exports() {
    let module = "toylang_import_basic.toy";
    fs::write(
        module,
        "exports[\"double\"] = lambda (x) { return x * 2; };\n\
         exports[\"name\"] = \"mathlib\";\n",
    )
    .unwrap();
    let result = run_script(
        "import toylang_import_basic as m;\n\
         assert(m[\"double\"](21) == 42);\n\
         assert(m[\"name\"] == \"mathlib\");",
        "test",
    );
    fs::remove_file(module).ok();
    result.unwrap();
}

#[test]
fn imports_without_alias_bind_the_module_name() {
    let module = "toylang_import_plain.toy";
    fs::write(module, "exports[\"value\"] = 7;\n").unwrap();
    let result = run_script(
        "import toylang_import_plain;\n\
         assert(toylang_import_plain[\"value\"] == 7);",
        "test",
    );
    fs::remove_file(module).ok();
    result.unwrap();
}

#[test]
fn imported_closures_keep_their_module_state() {
    let module = "toylang_import_counter.toy";
    fs::write(
        module,
        "let count = 0;\n\
         exports[\"next\"] = lambda () { count += 1; return count; };\n",
    )
    .unwrap();
    let result = run_script(
        "import toylang_import_counter as c;\n\
         assert(c[\"next\"]() == 1);\n\
         assert(c[\"next\"]() == 2);",
        "test",
    );
    fs::remove_file(module).ok();
    result.unwrap();
}

#[test]
fn import_failures() {
    assert_failure("import toylang_no_such_module;");

    let module = "toylang_import_broken.toy";
    fs::write(module, "let ;").unwrap();
    let error = run_script("import toylang_import_broken;", "test").unwrap_err();
    fs::remove_file(module).ok();
    assert!(error.to_string().contains("Errors while parsing module"));

    let module = "toylang_import_crashing.toy";
    fs::write(module, "assert(false);").unwrap();
    let error = run_script("import toylang_import_crashing;", "test").unwrap_err();
    fs::remove_file(module).ok();
    assert!(error.to_string().contains("Error while evaluating module"));
}

#[test]
fn file_read_and_write() {
    let path = std::env::temp_dir().join("toylang_rw_test.txt");
    let path = path.display().to_string();
    assert_success(&format!(
        "assert(write(\"{path}\", \"hello\") == true);\n\
         assert(read(\"{path}\") == \"hello\");\n\
         assert(write(\"{path}\", 42) == true);\n\
         assert(read(\"{path}\") == \"42\");"
    ));
    fs::remove_file(&path).ok();
    assert_success(&format!("assert(read(\"{path}\") == nil);"));
}
