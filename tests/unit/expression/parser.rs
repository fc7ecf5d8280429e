use super::*;

#[test]
fn parses_arithmetic_precedence() {
    let e = parse_expr("1+2*3").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Add,
            right,
            ..
        } => assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn strips_result_assignment_and_semicolon() {
    let e = parse_expr("$bm_rt = value * 2;").unwrap();
    assert_eq!(
        e,
        Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Ident("value".to_owned())),
            right: Box::new(Expr::Lit(Lit::F64(2.0))),
        }
    );
}

#[test]
fn parses_calls_and_conditionals() {
    match parse_expr("min(1, 2)").unwrap() {
        Expr::Call { func, args } => {
            assert_eq!(func, "min");
            assert_eq!(args.len(), 2);
        }
        other => panic!("unexpected ast: {other:?}"),
    }

    assert!(matches!(
        parse_expr("frame > 10 ? 1 : 0").unwrap(),
        Expr::Conditional { .. }
    ));
}

#[test]
fn rejects_trailing_garbage() {
    assert!(parse_expr("1 2").is_err());
    assert!(parse_expr("(1").is_err());
    assert!(parse_expr("x = 1").is_err());
    assert!(parse_expr("").is_err());
}

#[test]
fn binary_operators_are_left_associative() {
    let lit = |v: f64| Box::new(Expr::Lit(Lit::F64(v)));
    assert_eq!(
        parse_expr("8 - 4 - 2").unwrap(),
        Expr::Binary {
            op: BinaryOp::Sub,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Sub,
                left: lit(8.0),
                right: lit(4.0),
            }),
            right: lit(2.0),
        }
    );
}

#[test]
fn conditional_binds_loosest_and_nests_to_the_right() {
    match parse_expr("1 + a ? b : c ? d : e").unwrap() {
        Expr::Conditional {
            cond, otherwise, ..
        } => {
            assert!(matches!(*cond, Expr::Binary { op: BinaryOp::Add, .. }));
            assert!(matches!(*otherwise, Expr::Conditional { .. }));
        }
        other => panic!("unexpected ast: {other:?}"),
    }
}
