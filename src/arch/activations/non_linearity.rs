use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::functions::*;

/// The closed set of non-linearities a layer can use.
///
/// Each variant pairs an activation with its derivative, the derivative being expressed over
/// the activation's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonLinearity {
    Tanh,
    Relu,
    LeakyRelu,
    Softplus,
    Sigmoid,
    Softsign,
}
use NonLinearity::*;

impl NonLinearity {
    pub const ALL: [NonLinearity; 6] = [Tanh, Relu, LeakyRelu, Softplus, Sigmoid, Softsign];

    /// Applies the activation to a weighted sum.
    pub fn activate(&self, x: f32) -> f32 {
        match self {
            Tanh => tanh(x),
            Relu => relu(x),
            LeakyRelu => leaky_relu(x),
            Softplus => softplus(x),
            Sigmoid => sigmoid(x),
            Softsign => softsign(x),
        }
    }

    /// Returns the activation's derivative given its already computed output `y`.
    pub fn activate_derivative(&self, y: f32) -> f32 {
        match self {
            Tanh => tanh_prime(y),
            Relu => relu_prime(y),
            LeakyRelu => leaky_relu_prime(y),
            Softplus => softplus_prime(y),
            Sigmoid => sigmoid_prime(y),
            Softsign => softsign_prime(y),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tanh => "tanh",
            Relu => "relu",
            LeakyRelu => "leaky_relu",
            Softplus => "softplus",
            Sigmoid => "sigmoid",
            Softsign => "softsign",
        }
    }
}

impl Display for NonLinearity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_the_matching_pair() {
        assert_eq!(Tanh.activate(0.0), 0.0);
        assert_eq!(Tanh.activate_derivative(0.0), 1.0);
        assert_eq!(LeakyRelu.activate(-1.0), -0.01);
        assert_eq!(LeakyRelu.activate_derivative(-0.01), 0.01);
        assert_eq!(Sigmoid.activate(0.0), 0.5);
        assert_eq!(Sigmoid.activate_derivative(0.5), 0.25);
    }

    #[test]
    fn names_round_trip_through_serde() {
        for act in NonLinearity::ALL {
            let json = serde_json::to_string(&act).unwrap();
            assert_eq!(json, format!("\"{}\"", act.name()));

            let back: NonLinearity = serde_json::from_str(&json).unwrap();
            assert_eq!(back, act);
        }
    }
}
