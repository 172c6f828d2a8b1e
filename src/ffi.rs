//! FFI bindings for petcare-analytics
//!
//! This module provides C-compatible functions for calling the engine from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `petcare_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::calories::CalorieEstimator;
use crate::error::AnalyticsError;
use crate::pipeline::AnalyticsProcessor;
use crate::types::{NutritionGoal, Pet};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Record an engine error as `CODE: message`
fn set_engine_error(err: &AnalyticsError) {
    tracing::debug!(code = err.code(), error = %err, "ffi call failed");
    set_last_error(&format!("{}: {}", err.code(), err));
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn nutrition_goal_from_code(code: i32) -> Option<Option<NutritionGoal>> {
    match code {
        -1 => Some(None),
        0 => Some(Some(NutritionGoal::Maintain)),
        1 => Some(Some(NutritionGoal::LoseWeight)),
        2 => Some(Some(NutritionGoal::GainWeight)),
        _ => None,
    }
}

// ============================================================================
// Analysis API
// ============================================================================

/// Analyze a `petcare.analysis_request.v1` JSON document.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string.
/// - Returns a newly allocated report payload that must be freed with `petcare_free_string`.
/// - Returns NULL on error; call `petcare_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn petcare_analyze_json(request_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(request_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match AnalyticsProcessor::new().process_json(&json_str) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_engine_error(&e);
            ptr::null_mut()
        }
    }
}

/// Estimate daily calories for a pet given as JSON.
///
/// `nutrition_goal`: -1 = none, 0 = maintain, 1 = lose weight, 2 = gain weight.
///
/// # Safety
/// - `pet_json` must be a valid null-terminated C string.
/// - Returns the kcal/day estimate, or -1 on error; call `petcare_last_error`
///   to get the error message.
#[no_mangle]
pub unsafe extern "C" fn petcare_calories(pet_json: *const c_char, nutrition_goal: i32) -> i64 {
    clear_last_error();

    let json_str = match cstr_to_string(pet_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return -1;
        }
    };

    let goal = match nutrition_goal_from_code(nutrition_goal) {
        Some(goal) => goal,
        None => {
            set_last_error(&format!("Unknown nutrition goal code {nutrition_goal}"));
            return -1;
        }
    };

    let pet: Pet = match serde_json::from_str(&json_str) {
        Ok(pet) => pet,
        Err(e) => {
            set_engine_error(&AnalyticsError::from(e));
            return -1;
        }
    };

    match CalorieEstimator::new().estimate_daily_calories(&pet, goal) {
        Ok(kcal) => i64::from(kcal),
        Err(e) => {
            set_engine_error(&e);
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by petcare functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a petcare function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn petcare_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next petcare function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn petcare_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn petcare_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
