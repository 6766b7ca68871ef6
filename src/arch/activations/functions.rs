//! Activation functions and their derivatives.
//!
//! Every derivative takes the *activated* value `y = f(x)`, not the raw sum `x`, since that is
//! what backpropagation has at hand once the forward pass is done.

/// Slope applied to negative inputs by the leaky rectifier.
pub const LEAKY_SLOPE: f32 = 0.01;

pub fn tanh(x: f32) -> f32 {
    x.tanh()
}

pub fn tanh_prime(y: f32) -> f32 {
    1.0 - y * y
}

pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

pub fn relu_prime(y: f32) -> f32 {
    if y > 0.0 {
        1.0
    } else {
        0.0
    }
}

pub fn leaky_relu(x: f32) -> f32 {
    if x > 0.0 {
        x
    } else {
        LEAKY_SLOPE * x
    }
}

pub fn leaky_relu_prime(y: f32) -> f32 {
    if y > 0.0 {
        1.0
    } else {
        LEAKY_SLOPE
    }
}

/// `ln(1 + e^x)`, rearranged so large `|x|` neither overflows nor loses the linear tail.
pub fn softplus(x: f32) -> f32 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// The logistic function of the pre-activation, recovered from `y = softplus(x)`.
pub fn softplus_prime(y: f32) -> f32 {
    -(-y).exp_m1()
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

pub fn sigmoid_prime(y: f32) -> f32 {
    y * (1.0 - y)
}

pub fn softsign(x: f32) -> f32 {
    x / (1.0 + x.abs())
}

pub fn softsign_prime(y: f32) -> f32 {
    let s = 1.0 - y.abs();
    s * s
}
