use cpublish::*;
use pretty_assertions::assert_eq;
use std::ffi::{CStr, CString};
use std::ptr::null;

fn assert_ok(status: &CPublishStatus) {
    assert!(status.is_ok(), "Err: {:?}", status.message());
}

fn assert_error(status: &CPublishStatus, expected: &str) {
    assert!(!status.is_ok(), "Expected error {expected:?}");
    assert_eq!(status.message().as_deref(), Some(expected));
}

#[test]
fn test_scalars_round_trip() {
    unsafe {
        let mut status = cpublish_status_new();

        for input in [i64::MIN, -1, 0, 1, i64::MAX] {
            let value = cpublish_value_new_int(input);
            assert_eq!(cpublish_value_int(value, &mut status), input);
            assert_ok(&status);
            assert_eq!(
                cpublish_value_type(value, &mut status),
                CPublishValueType::CPublishValueTypeInteger
            );
            cpublish_value_destroy(value);
        }

        for input in [f64::MAX, f64::MIN, f64::INFINITY, f64::NEG_INFINITY, 0.5] {
            let value = cpublish_value_new_float(input);
            assert_eq!(cpublish_value_float(value, &mut status), input);
            assert_ok(&status);
            cpublish_value_destroy(value);
        }

        let nan = cpublish_value_new_float(f64::NAN);
        assert!(cpublish_value_float(nan, &mut status).is_nan());
        cpublish_value_destroy(nan);

        let flag = cpublish_value_new_bool(true);
        assert!(cpublish_value_bool(flag, &mut status));
        assert_ok(&status);
        cpublish_value_destroy(flag);

        let none = cpublish_value_new_none();
        assert_eq!(
            cpublish_value_type(none, &mut status),
            CPublishValueType::CPublishValueTypeNone
        );
        cpublish_value_destroy(none);
    }
}

#[test]
fn test_string_copy_outlives_value() {
    unsafe {
        let mut status = cpublish_status_new();
        let long = "x".repeat(10_000);

        for input in ["", "hello", long.as_str()] {
            let text = CString::new(input).unwrap();
            let value = cpublish_value_new_string(text.as_ptr());

            let mut copy = cpublish_value_string(value, &mut status);
            assert_ok(&status);
            cpublish_value_destroy(value);

            assert_eq!(CStr::from_ptr(copy.string).to_str().unwrap(), input);
            cpublish_string_destroy(&mut copy);
            cpublish_string_destroy(&mut copy);
        }

        assert!(cpublish_value_new_string(null()).is_null());
    }
}

#[test]
fn test_type_mismatch_reports_error() {
    unsafe {
        let mut status = cpublish_status_new();
        let value = cpublish_value_new_int(7);

        assert!(!cpublish_value_bool(value, &mut status));
        assert_error(&status, "value is not boolean (found integer)");

        let copy = cpublish_value_string(value, &mut status);
        assert!(copy.string.is_null());
        assert_error(&status, "value is not string (found integer)");

        assert_eq!(cpublish_value_array_len(value, &mut status), 0);
        assert_error(&status, "value is not array (found integer)");

        cpublish_value_destroy(value);
        cpublish_status_destroy(&mut status);
    }
}

#[test]
fn test_null_handles_report_error() {
    unsafe {
        let mut status = cpublish_status_new();

        assert_eq!(cpublish_value_int(null(), &mut status), 0);
        assert_error(&status, "value is null");

        let array = cpublish_value_new_array();
        cpublish_value_array_push(array, null(), &mut status);
        assert_error(&status, "item is null");
        cpublish_value_destroy(array);

        assert!(cpublish_value_iter_array_is_done(null(), &mut status));
        assert_error(&status, "iter is null");

        cpublish_value_destroy(std::ptr::null_mut());
    }
}

#[test]
fn test_array_push_get_and_bounds() {
    unsafe {
        let mut status = cpublish_status_new();
        let array = cpublish_value_new_array_with_capacity(4);

        let item = cpublish_value_new_int(10);
        cpublish_value_array_push(array, item, &mut status);
        assert_ok(&status);
        cpublish_value_destroy(item);

        let item = cpublish_value_new_bool(false);
        cpublish_value_array_push(array, item, &mut status);
        cpublish_value_destroy(item);

        assert_eq!(cpublish_value_array_len(array, &mut status), 2);

        let first = cpublish_value_array_get(array, 0, &mut status);
        assert_ok(&status);
        assert_eq!(cpublish_value_int(first, &mut status), 10);

        let missing = cpublish_value_array_get(array, 2, &mut status);
        assert!(missing.is_null());
        assert_error(&status, "index 2 out of range for array of length 2");

        cpublish_value_destroy(array);
    }
}

#[test]
fn test_array_push_into_itself() {
    unsafe {
        let mut status = cpublish_status_new();
        let array = cpublish_value_new_array();

        cpublish_value_array_push(array, array, &mut status);
        assert_ok(&status);
        assert_eq!(cpublish_value_array_len(array, &mut status), 1);

        let inner = cpublish_value_array_get(array, 0, &mut status);
        assert_eq!(cpublish_value_array_len(inner, &mut status), 0);

        cpublish_value_destroy(array);
    }
}

#[test]
fn test_object_insert_get_and_absent() {
    unsafe {
        let mut status = cpublish_status_new();
        let object = cpublish_value_new_object_with_capacity(2);
        let key = CString::new("name").unwrap();

        let item = cpublish_value_new_int(1);
        cpublish_value_object_insert(object, key.as_ptr(), item, &mut status);
        cpublish_value_destroy(item);

        let item = cpublish_value_new_int(2);
        cpublish_value_object_insert(object, key.as_ptr(), item, &mut status);
        cpublish_value_destroy(item);
        assert_ok(&status);

        assert_eq!(cpublish_value_object_len(object, &mut status), 1);
        let found = cpublish_value_object_get(object, key.as_ptr(), &mut status);
        assert_eq!(cpublish_value_int(found, &mut status), 2);

        let other = CString::new("other").unwrap();
        let absent = cpublish_value_object_get(object, other.as_ptr(), &mut status);
        assert!(absent.is_null());
        assert_ok(&status);

        let bad_key = CString::new(vec![0xc3, 0x28]).unwrap();
        cpublish_value_object_get(object, bad_key.as_ptr(), &mut status);
        assert_error(&status, "key is not valid UTF-8");

        let array = cpublish_value_new_array();
        cpublish_value_object_get(array, key.as_ptr(), &mut status);
        assert_error(&status, "value is not object (found array)");

        cpublish_value_destroy(array);
        cpublish_value_destroy(object);
    }
}

#[test]
fn test_array_iter_snapshot() {
    unsafe {
        let mut status = cpublish_status_new();
        let array = cpublish_value_new_array();
        for n in 0..3 {
            let item = cpublish_value_new_int(n);
            cpublish_value_array_push(array, item, &mut status);
            cpublish_value_destroy(item);
        }

        let iter = cpublish_value_array_iter(array, &mut status);
        assert_ok(&status);

        // changes after creation are not observed
        let extra = cpublish_value_new_int(99);
        cpublish_value_array_push(array, extra, &mut status);
        cpublish_value_destroy(extra);
        cpublish_value_destroy(array);

        let mut seen = Vec::new();
        while !cpublish_value_iter_array_is_done(iter, &mut status) {
            let value = cpublish_value_iter_array_value(iter, &mut status);
            seen.push(cpublish_value_int(value, &mut status));
            cpublish_value_iter_array_next(iter, &mut status);
        }
        assert_eq!(seen, vec![0, 1, 2]);

        cpublish_value_iter_array_next(iter, &mut status);
        assert_ok(&status);
        assert!(cpublish_value_iter_array_value(iter, &mut status).is_null());

        cpublish_value_iter_array_destroy(iter);
    }
}

#[test]
fn test_object_iter_order() {
    unsafe {
        let mut status = cpublish_status_new();
        let object = cpublish_value_new_object();
        for (key, n) in [("c", 3), ("a", 1), ("b", 2)] {
            let key = CString::new(key).unwrap();
            let item = cpublish_value_new_int(n);
            cpublish_value_object_insert(object, key.as_ptr(), item, &mut status);
            cpublish_value_destroy(item);
        }

        let iter = cpublish_value_object_iter(object, &mut status);
        let mut seen = Vec::new();
        while !cpublish_value_iter_object_is_done(iter, &mut status) {
            let key = cpublish_value_iter_object_key(iter, &mut status);
            let value = cpublish_value_iter_object_value(iter, &mut status);
            seen.push((
                key.to_string_lossy().unwrap(),
                cpublish_value_int(value, &mut status),
            ));
            cpublish_value_iter_object_next(iter, &mut status);
        }

        assert_eq!(
            seen,
            vec![
                ("c".to_string(), 3),
                ("a".to_string(), 1),
                ("b".to_string(), 2),
            ]
        );
        assert!(cpublish_value_iter_object_key(iter, &mut status)
            .string
            .is_null());

        cpublish_value_iter_object_destroy(iter);
        cpublish_value_destroy(object);
    }
}
