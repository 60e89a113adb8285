use std::{cell::RefCell, collections::HashMap, ffi::c_void, ptr, thread_local};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFRelease, CFTypeRef, TCFType},
    string::{CFString, CFStringRef},
};
use tracing::trace;

use crate::{
    error::{Error, Result},
    geom::{Point, Size},
};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateApplication(pid: i32) -> *mut c_void;
    fn AXUIElementCopyAttributeValue(
        element: *mut c_void,
        attr: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(element: *mut c_void, attr: CFStringRef, value: CFTypeRef)
    -> i32;

    // AXValue helpers for CGPoint/CGSize
    fn AXValueCreate(theType: i32, valuePtr: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(theValue: CFTypeRef, theType: i32, valuePtr: *mut c_void) -> bool;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFRetain(cf: CFTypeRef) -> CFTypeRef;
    fn CFEqual(a: CFTypeRef, b: CFTypeRef) -> bool;
}

// AXValue type constants (per Apple docs)
const K_AX_VALUE_CGPOINT_TYPE: i32 = 1;
const K_AX_VALUE_CGSIZE_TYPE: i32 = 2;

// AXError codes we distinguish.
const K_AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;
const K_AX_ERROR_ATTRIBUTE_UNSUPPORTED: i32 = -25205;
const K_AX_ERROR_API_DISABLED: i32 = -25211;
const K_AX_ERROR_NO_VALUE: i32 = -25212;

pub(crate) const ATTR_FOCUSED_WINDOW: &str = "AXFocusedWindow";
pub(crate) const ATTR_MAIN_WINDOW: &str = "AXMainWindow";
pub(crate) const ATTR_WINDOWS: &str = "AXWindows";
pub(crate) const ATTR_POSITION: &str = "AXPosition";
pub(crate) const ATTR_SIZE: &str = "AXSize";

thread_local! {
    static ATTR_STRINGS: RefCell<HashMap<&'static str, CFString>> = RefCell::new(HashMap::new());
}

pub(crate) fn cfstr(name: &'static str) -> CFStringRef {
    // Stable CFStringRef per attribute name; avoids toll-free bridging of
    // static strings, which trips pointer authentication on recent macOS.
    ATTR_STRINGS.with(|cell| {
        let mut m = cell.borrow_mut();
        let s = m.entry(name).or_insert_with(|| CFString::new(name));
        s.as_concrete_TypeRef()
    })
}

/// Map a non-zero AXError to our error type.
fn ax_err(code: i32) -> Error {
    match code {
        K_AX_ERROR_INVALID_UI_ELEMENT => Error::WindowGone,
        K_AX_ERROR_ATTRIBUTE_UNSUPPORTED => Error::Unsupported,
        K_AX_ERROR_API_DISABLED => Error::Permission,
        K_AX_ERROR_NO_VALUE => Error::NoWindow,
        other => Error::AxCode(other),
    }
}

/// Owned AX element; releases its retain on drop.
pub(crate) struct AXElem(*mut c_void);

// AXUIElementRef is a CFType: retain/release and attribute calls are
// thread-safe, so ownership may move across threads.
unsafe impl Send for AXElem {}

impl AXElem {
    /// Take ownership of a pointer returned under the Create/Copy rule.
    pub(crate) fn from_create(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() { None } else { Some(Self(ptr)) }
    }

    /// Retain a borrowed pointer (e.g. an element inside a CFArray).
    pub(crate) fn retain_from_borrowed(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        unsafe { CFRetain(ptr as CFTypeRef) };
        Some(Self(ptr))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    /// True when both refer to the same UI element.
    pub(crate) fn same_element(&self, other: &Self) -> bool {
        unsafe { CFEqual(self.0 as CFTypeRef, other.0 as CFTypeRef) }
    }
}

impl Drop for AXElem {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

/// AX application element for `pid`.
pub(crate) fn app_element(pid: i32) -> Result<AXElem> {
    AXElem::from_create(unsafe { AXUIElementCreateApplication(pid) }).ok_or(Error::AppElement)
}

/// Copy an element-valued attribute (e.g. `AXFocusedWindow`).
pub(crate) fn copy_element(element: &AXElem, attr: &'static str) -> Result<AXElem> {
    let mut v: CFTypeRef = ptr::null_mut();
    let err = unsafe { AXUIElementCopyAttributeValue(element.as_ptr(), cfstr(attr), &mut v) };
    trace!(attr, err, "AXUIElementCopyAttributeValue");
    if err != 0 {
        return Err(ax_err(err));
    }
    AXElem::from_create(v as *mut c_void).ok_or(Error::NoWindow)
}

/// First element of the `AXWindows` array.
pub(crate) fn first_of_windows(app: &AXElem) -> Result<AXElem> {
    let mut wins_ref: CFTypeRef = ptr::null_mut();
    let err =
        unsafe { AXUIElementCopyAttributeValue(app.as_ptr(), cfstr(ATTR_WINDOWS), &mut wins_ref) };
    trace!(err, "AXWindows");
    if err != 0 {
        return Err(ax_err(err));
    }
    if wins_ref.is_null() {
        return Err(Error::NoWindow);
    }
    let arr = unsafe { CFArray::<*const c_void>::wrap_under_create_rule(wins_ref as _) };
    let n = unsafe { CFArrayGetCount(arr.as_concrete_TypeRef()) };
    if n == 0 {
        return Err(Error::NoWindow);
    }
    let w = unsafe { CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), 0) } as *mut c_void;
    // Retain so the element outlives `arr`.
    AXElem::retain_from_borrowed(w).ok_or(Error::NoWindow)
}

pub(crate) fn get_point(element: *mut c_void, attr: &'static str) -> Result<Point> {
    let mut v: CFTypeRef = ptr::null_mut();
    let err = unsafe { AXUIElementCopyAttributeValue(element, cfstr(attr), &mut v) };
    if err != 0 {
        return Err(ax_err(err));
    }
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let mut p = Point { x: 0.0, y: 0.0 };
    let ok =
        unsafe { AXValueGetValue(v, K_AX_VALUE_CGPOINT_TYPE, &mut p as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(p)
}

pub(crate) fn get_size(element: *mut c_void, attr: &'static str) -> Result<Size> {
    let mut v: CFTypeRef = ptr::null_mut();
    let err = unsafe { AXUIElementCopyAttributeValue(element, cfstr(attr), &mut v) };
    if err != 0 {
        return Err(ax_err(err));
    }
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let mut s = Size {
        width: 0.0,
        height: 0.0,
    };
    let ok = unsafe { AXValueGetValue(v, K_AX_VALUE_CGSIZE_TYPE, &mut s as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(s)
}

pub(crate) fn set_point(element: *mut c_void, attr: &'static str, p: Point) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGPOINT_TYPE, &p as *const _ as *const c_void) };
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let err = unsafe { AXUIElementSetAttributeValue(element, cfstr(attr), v) };
    unsafe { CFRelease(v) };
    if err != 0 {
        return Err(ax_err(err));
    }
    Ok(())
}

pub(crate) fn set_size(element: *mut c_void, attr: &'static str, s: Size) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGSIZE_TYPE, &s as *const _ as *const c_void) };
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let err = unsafe { AXUIElementSetAttributeValue(element, cfstr(attr), v) };
    unsafe { CFRelease(v) };
    if err != 0 {
        return Err(ax_err(err));
    }
    Ok(())
}

pub(crate) fn ax_check() -> Result<()> {
    if permissions::accessibility_ok() {
        Ok(())
    } else {
        Err(Error::Permission)
    }
}
