/*!
 * Compiler Optimization Hints
 * Branch prediction hints for the append and growth paths
 */

/// Hint to the compiler that this branch is likely to be taken
///
/// On nightly with core_intrinsics, uses LLVM's `llvm.expect` intrinsic.
/// On stable, returns the value unchanged.
#[inline(always)]
#[must_use]
pub fn likely(b: bool) -> bool {
    #[cfg(feature = "nightly")]
    {
        unsafe { core::intrinsics::likely(b) }
    }
    #[cfg(not(feature = "nightly"))]
    {
        b
    }
}

/// Hint to the compiler that this branch is unlikely to be taken
///
/// Use for growth and error paths. The fast append path (enough spare
/// capacity) is the common case.
#[inline(always)]
#[must_use]
pub fn unlikely(b: bool) -> bool {
    #[cfg(feature = "nightly")]
    {
        unsafe { core::intrinsics::unlikely(b) }
    }
    #[cfg(not(feature = "nightly"))]
    {
        b
    }
}
