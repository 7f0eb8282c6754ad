//! Tests for the horizontal Gaussian smoothing pass.

use colorizer::smoothing::{smooth_horizontal, Kernel};
use colorize_common::RgbaBuffer;
use test_utils::{assert_approx_eq, solid, uniform_gray};

// ============================================================================
// Kernel
// ============================================================================

#[test]
fn test_radius_one_kernel_weights() {
    let kernel = Kernel::gaussian(1);
    assert_eq!(kernel.len(), 3);

    let w = kernel.weights();
    assert_approx_eq!(w.iter().sum::<f64>(), 1.0, 1e-9);
    assert_approx_eq!(w[1], 0.97826, 1e-4);
    assert_approx_eq!(w[0], w[2], 1e-15);
    assert_approx_eq!(w[0], 0.010868, 1e-5);
}

#[test]
fn test_kernel_is_normalized_for_larger_radii() {
    for radius in 0..=16 {
        let kernel = Kernel::gaussian(radius);
        assert_eq!(kernel.len(), 2 * radius + 1);
        assert_approx_eq!(kernel.weights().iter().sum::<f64>(), 1.0, 1e-9);
    }
}

#[test]
fn test_zero_radius_is_identity() {
    let kernel = Kernel::gaussian(0);
    assert_eq!(kernel.weights(), &[1.0]);

    let src = test_utils::horizontal_ramp(9, 2);
    assert_eq!(smooth_horizontal(&src, &kernel), src);
}

// ============================================================================
// Convolution
// ============================================================================

#[test]
fn test_uniform_image_unchanged() {
    let src = uniform_gray(6, 3, 200);
    assert_eq!(smooth_horizontal(&src, &Kernel::gaussian(1)), src);
}

#[test]
fn test_isolated_bright_column() {
    let data = vec![
        0, 0, 0, 255, //
        255, 255, 255, 255, //
        0, 0, 0, 255,
    ];
    let src = RgbaBuffer::from_raw(3, 1, data).unwrap();
    let out = smooth_horizontal(&src, &Kernel::gaussian(1));

    assert_eq!(out.pixel(0, 0), [3, 3, 3, 255]);
    assert_eq!(out.pixel(1, 0), [249, 249, 249, 255]);
    assert_eq!(out.pixel(2, 0), [3, 3, 3, 255]);
}

#[test]
fn test_no_vertical_mixing() {
    // Bright middle row between two black rows stays exactly as it was.
    let mut src = solid(4, 3, [0, 0, 0, 255]);
    for x in 0..4 {
        src.set_pixel(x, 1, [255, 255, 255, 255]);
    }

    let out = smooth_horizontal(&src, &Kernel::gaussian(1));
    assert_eq!(out, src);
}

#[test]
fn test_alpha_is_smoothed_like_color() {
    let mut src = solid(3, 1, [0, 0, 0, 0]);
    src.set_pixel(1, 0, [255, 255, 255, 255]);

    let out = smooth_horizontal(&src, &Kernel::gaussian(1));
    assert_eq!(out.alpha().collect::<Vec<_>>(), vec![3, 249, 3]);
}

#[test]
fn test_single_column_image() {
    let src = solid(1, 5, [77, 88, 99, 255]);
    assert_eq!(smooth_horizontal(&src, &Kernel::gaussian(3)), src);
}
