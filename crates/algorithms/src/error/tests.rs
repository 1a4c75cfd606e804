use super::*;

#[test]
fn test_error_conversion() {
    let err = Error::param("window", "out of range");
    match CoreError::from(err) {
        CoreError::InvalidParameter { context, message } => {
            assert_eq!(context, "window");
            assert_eq!(message, "out of range");
        }
        other => panic!("Expected InvalidParameter error, got {:?}", other),
    }

    let err = Error::Length {
        context: "G1 encoding",
        expected: 48,
        actual: 47,
    };
    match CoreError::from(err) {
        CoreError::InvalidLength {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "G1 encoding");
            assert_eq!(expected, 48);
            assert_eq!(actual, 47);
        }
        other => panic!("Expected InvalidLength error, got {:?}", other),
    }

    match CoreError::from(Error::point("from_compressed", "not on curve")) {
        CoreError::InvalidKey { context, message } => {
            assert_eq!(context, "from_compressed");
            assert_eq!(message, "not on curve");
        }
        other => panic!("Expected InvalidKey error, got {:?}", other),
    }
}

#[test]
fn test_validation_functions() {
    assert!(validate::parameter(true, "test", "should pass").is_ok());
    match validate::parameter(false, "test", "should fail").unwrap_err() {
        Error::Parameter { name, reason } => {
            assert_eq!(name, "test");
            assert_eq!(reason, "should fail");
        }
        other => panic!("Expected Parameter error, got {:?}", other),
    }

    assert!(validate::length("buffer", 32, 32).is_ok());
    assert_eq!(
        validate::length("buffer", 16, 32).unwrap_err(),
        Error::Length {
            context: "buffer",
            expected: 32,
            actual: 16
        }
    );

    assert!(validate::max_length("dst", 255, 255).is_ok());
    assert!(validate::max_length("dst", 256, 255).is_err());

    assert_eq!(
        validate::point(false, "validate", "not on curve").unwrap_err(),
        Error::Point {
            operation: "validate",
            details: "not on curve"
        }
    );
    assert!(matches!(
        validate::field(false, "divide", "division by zero"),
        Err(Error::Field { .. })
    ));
}

#[test]
fn test_display() {
    assert_eq!(
        Error::Pairing {
            details: "point at infinity"
        }
        .to_string(),
        "Pairing error: point at infinity"
    );
    assert_eq!(
        to_core_result::<()>(Err(Error::Other("boom")), "bls").unwrap_err(),
        CoreError::Other {
            context: "bls",
            message: String::new()
        }
    );
}
