//! Calls into NULL-terminated C variadic functions.
//!
//! libvips passes optional arguments as trailing `name, value, ..., NULL`
//! lists. [`VarArgs`] is implemented for tuples of up to [`MAX_VARARGS`]
//! values; each call appends the tuple and then the NULL sentinel. Larger
//! tuples have no implementation, so an over-long call does not compile:
//!
//! ```compile_fail
//! use vips_binding::processing::libvips::varargs::VarArgs;
//! use vips_binding::processing::libvips::sys;
//!
//! let args = (0, 0, 0, 0, 0, 0, 0, 0, 0);
//! unsafe { args.invoke1(sys::vips_image_new_from_file, std::ptr::null()) };
//! ```

use std::ffi::{c_char, c_double, c_int, c_void};
use std::ptr;

use super::sys::VipsImage;

/// Most trailing arguments a single call may pass, sentinel excluded.
pub const MAX_VARARGS: usize = 8;

mod sealed {
    pub trait Sealed {}
}

/// A type that may be passed in a C variadic position without promotion.
pub trait VaArg: sealed::Sealed + Copy {}

macro_rules! va_arg_types {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl VaArg for $ty {}
        )*
    };
}

va_arg_types!(
    c_int,
    c_double,
    *const c_char,
    *mut c_void,
    *mut c_int,
    *mut c_double,
    *mut *mut VipsImage,
);

/// A bounded list of trailing arguments for a NULL-terminated variadic call.
pub trait VarArgs: sealed::Sealed {
    /// Calls `f(a, args..., NULL)`.
    ///
    /// # Safety
    ///
    /// `f` must accept a NULL-terminated list and the arguments must match
    /// what it reads for them.
    unsafe fn invoke1<A, R>(self, f: unsafe extern "C" fn(A, ...) -> R, a: A) -> R;

    /// Calls `f(a, b, args..., NULL)`.
    ///
    /// # Safety
    ///
    /// Same contract as [`VarArgs::invoke1`].
    unsafe fn invoke2<A, B, R>(self, f: unsafe extern "C" fn(A, B, ...) -> R, a: A, b: B) -> R;
}

macro_rules! impl_var_args {
    ($($ty:ident $arg:ident),*) => {
        impl<$($ty: VaArg),*> sealed::Sealed for ($($ty,)*) {}

        impl<$($ty: VaArg),*> VarArgs for ($($ty,)*) {
            unsafe fn invoke1<A, R>(self, f: unsafe extern "C" fn(A, ...) -> R, a: A) -> R {
                let ($($arg,)*) = self;
                unsafe { f(a, $($arg,)* ptr::null::<c_char>()) }
            }

            unsafe fn invoke2<A, B, R>(
                self,
                f: unsafe extern "C" fn(A, B, ...) -> R,
                a: A,
                b: B,
            ) -> R {
                let ($($arg,)*) = self;
                unsafe { f(a, b, $($arg,)* ptr::null::<c_char>()) }
            }
        }
    };
}

impl_var_args!();
impl_var_args!(T1 a1);
impl_var_args!(T1 a1, T2 a2);
impl_var_args!(T1 a1, T2 a2, T3 a3);
impl_var_args!(T1 a1, T2 a2, T3 a3, T4 a4);
impl_var_args!(T1 a1, T2 a2, T3 a3, T4 a4, T5 a5);
impl_var_args!(T1 a1, T2 a2, T3 a3, T4 a4, T5 a5, T6 a6);
impl_var_args!(T1 a1, T2 a2, T3 a3, T4 a4, T5 a5, T6 a6, T7 a7);
impl_var_args!(T1 a1, T2 a2, T3 a3, T4 a4, T5 a5, T6 a6, T7 a7, T8 a8);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::libvips::sys;

    // libc's sscanf has the same shape as the libvips calls: fixed leading
    // arguments, then a variadic tail it reads according to the format.
    unsafe extern "C" {
        fn sscanf(s: *const c_char, format: *const c_char, ...) -> c_int;
    }

    #[test]
    fn empty_tail_passes_only_the_sentinel() {
        let matched = unsafe { ().invoke2(sscanf, c"42".as_ptr(), c"".as_ptr()) };
        assert_eq!(matched, 0);
    }

    #[test]
    fn trailing_arguments_are_forwarded_in_order() {
        let mut int: c_int = 0;
        let mut double: c_double = 0.0;

        let matched = unsafe {
            (&raw mut int, &raw mut double).invoke2(
                sscanf,
                c"7 2.5".as_ptr(),
                c"%d %lf".as_ptr(),
            )
        };

        assert_eq!(matched, 2);
        assert_eq!(int, 7);
        assert_eq!(double, 2.5);
    }

    #[test]
    fn libvips_entry_points_fit_the_adapter() {
        let _: unsafe extern "C" fn(*const c_char, ...) -> *mut VipsImage =
            sys::vips_image_new_from_file;
        let _: unsafe extern "C" fn(*mut VipsImage, *const c_char, ...) -> c_int =
            sys::vips_image_write_to_file;
        let _: unsafe extern "C" fn(*mut VipsImage, *mut c_double, ...) -> c_int = sys::vips_avg;
    }

    #[test]
    fn arity_ceiling_is_eight() {
        fn assert_var_args<T: VarArgs>(_: &T) {}

        let p: *mut c_int = ptr::null_mut();
        assert_var_args(&(p, p, p, p, p, p, p, p));
        assert_eq!(MAX_VARARGS, 8);
    }
}
