use crate::config::load_config;
use crate::filters::{IirFilter, SOS_ROW_LEN};

use std::ffi::CStr;
use std::os::raw::c_char;
use std::os::raw::c_void;
use std::ptr;

// -----------------------------------------------------------------------------
// C ABI
// -----------------------------------------------------------------------------
//
// Handles are opaque `void*` owning one `IirFilter`. A handle must only be
// used from one thread at a time.

fn into_handle(filter: IirFilter) -> *mut c_void {
    Box::into_raw(Box::new(filter)) as *mut c_void
}

/// Creates a filter from `n_sections` flat SOS rows laid out contiguously,
/// `6 * n_sections` doubles in total. Returns null on invalid input.
///
/// # Safety
///
/// `coeffs` must point to at least `6 * n_sections` readable doubles.
#[no_mangle]
pub unsafe extern "C" fn create_iir_filter(coeffs: *const f64, n_sections: usize) -> *mut c_void {
    if coeffs.is_null() || n_sections == 0 {
        return ptr::null_mut();
    }
    let Some(len) = n_sections.checked_mul(SOS_ROW_LEN) else {
        return ptr::null_mut();
    };

    let flat = std::slice::from_raw_parts(coeffs, len);
    let rows: Vec<&[f64]> = flat.chunks_exact(SOS_ROW_LEN).collect();

    match IirFilter::from_sos(&rows) {
        Ok(filter) => into_handle(filter),
        Err(e) => {
            eprintln!("create_iir_filter: {}", e);
            ptr::null_mut()
        }
    }
}

/// Creates a filter from a YAML config file. Returns null on any error.
///
/// # Safety
///
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn create_iir_filter_from_config(path: *const c_char) -> *mut c_void {
    if path.is_null() {
        return ptr::null_mut();
    }
    let path = match CStr::from_ptr(path).to_str() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("create_iir_filter_from_config: {}", e);
            return ptr::null_mut();
        }
    };

    let filter = load_config(path).and_then(|config| config.build_filter().map_err(|e| e.to_string()));
    match filter {
        Ok(filter) => into_handle(filter),
        Err(e) => {
            eprintln!("create_iir_filter_from_config: {}", e);
            ptr::null_mut()
        }
    }
}

/// Filters one sample. Returns NaN for a null handle.
///
/// # Safety
///
/// `filter_ptr` must be null or a live handle from one of the constructors.
#[no_mangle]
pub unsafe extern "C" fn iir_filter_sample(filter_ptr: *mut c_void, sample: f64) -> f64 {
    if filter_ptr.is_null() {
        return f64::NAN;
    }
    let filter = &mut *(filter_ptr as *mut IirFilter);
    filter.filter(sample)
}

/// # Safety
///
/// `filter_ptr` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn reset_iir_filter(filter_ptr: *mut c_void) {
    if filter_ptr.is_null() {
        return;
    }
    let filter = &mut *(filter_ptr as *mut IirFilter);
    filter.reset();
}

/// Filter order (twice the section count), 0 for a null handle.
///
/// # Safety
///
/// `filter_ptr` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn iir_filter_order(filter_ptr: *const c_void) -> usize {
    if filter_ptr.is_null() {
        return 0;
    }
    let filter = &*(filter_ptr as *const IirFilter);
    filter.order()
}

/// # Safety
///
/// `filter_ptr` must be null or a live handle; it is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn delete_iir_filter(filter_ptr: *mut c_void) {
    if !filter_ptr.is_null() {
        drop(Box::from_raw(filter_ptr as *mut IirFilter));
    }
}
