use log::{debug, info, log_enabled, trace, Level};
use ndarray::{s, Array1, ArrayView1, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{activations::NonLinearity, init::WeightGen, NumericBuffer, NumericGrid};
use crate::{dataset::TrainingSample, MindErr, Result};

/// Step size and momentum coefficient applied by backpropagation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparams {
    pub learning_rate: f32,
    pub momentum: f32,
}

impl Hyperparams {
    pub fn new(learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
        }
    }
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self::new(0.5, 0.1)
    }
}

/// The activations left behind by the last forward pass.
///
/// Only meaningful between a forward pass and the backpropagation that follows it on the same
/// sample. The last input slot is the bias unit and stays at 1.0.
#[derive(Debug, Clone)]
pub struct Scratch {
    input: NumericBuffer,
    hidden: NumericBuffer,
    output: NumericBuffer,
}

impl Scratch {
    fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input: NumericBuffer::filled(input_size + 1, 1.0),
            hidden: NumericBuffer::filled(hidden_size, 1.0),
            output: NumericBuffer::filled(output_size, 1.0),
        }
    }

    pub fn input(&self) -> &NumericBuffer {
        &self.input
    }

    pub fn hidden(&self) -> &NumericBuffer {
        &self.hidden
    }

    pub fn output(&self) -> &NumericBuffer {
        &self.output
    }
}

/// A fully connected network with a single hidden layer, trained online with momentum.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    hidden_act: NonLinearity,
    output_act: NonLinearity,

    scratch: Scratch,

    // (input_size + 1) x hidden_size, the last row belongs to the bias unit
    weight_input: NumericGrid,
    // hidden_size x output_size
    weight_output: NumericGrid,
    momentum_input: NumericGrid,
    momentum_output: NumericGrid,
}

impl Network {
    /// Creates a new `Network` with the default non-linearities (tanh hidden, leaky relu output).
    ///
    /// # Arguments
    /// * `input_size` - The amount of inputs, not counting the bias unit.
    /// * `hidden_size` - The amount of hidden units.
    /// * `output_size` - The amount of outputs.
    /// * `weight_gen` - The source of the initial weights, input grid first.
    ///
    /// # Returns
    /// An error if any of the sizes is zero.
    pub fn new<R: Rng>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        weight_gen: &mut WeightGen<R>,
    ) -> Result<Self> {
        Self::with_non_linearities(
            input_size,
            hidden_size,
            output_size,
            NonLinearity::Tanh,
            NonLinearity::LeakyRelu,
            weight_gen,
        )
    }

    /// Creates a new `Network` with explicit non-linearities.
    ///
    /// # Arguments
    /// * `input_size` - The amount of inputs, not counting the bias unit.
    /// * `hidden_size` - The amount of hidden units.
    /// * `output_size` - The amount of outputs.
    /// * `hidden_act` - The hidden layer's non-linearity.
    /// * `output_act` - The output layer's non-linearity.
    /// * `weight_gen` - The source of the initial weights, input grid first.
    ///
    /// # Returns
    /// An error if any of the sizes is zero.
    pub fn with_non_linearities<R: Rng>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        hidden_act: NonLinearity,
        output_act: NonLinearity,
        weight_gen: &mut WeightGen<R>,
    ) -> Result<Self> {
        if input_size == 0 || hidden_size == 0 || output_size == 0 {
            return Err(MindErr::InvalidInput("layer sizes must be greater than zero"));
        }

        let weight_input = weight_gen.grid(input_size + 1, hidden_size);
        let weight_output = weight_gen.grid(hidden_size, output_size);

        info!(
            input_size = input_size,
            hidden_size = hidden_size,
            output_size = output_size,
            hidden_act = hidden_act.name(),
            output_act = output_act.name();
            "network created"
        );

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            hidden_act,
            output_act,
            scratch: Scratch::new(input_size, hidden_size, output_size),
            momentum_input: NumericGrid::zeros(input_size + 1, hidden_size),
            momentum_output: NumericGrid::zeros(hidden_size, output_size),
            weight_input,
            weight_output,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn hidden_act(&self) -> NonLinearity {
        self.hidden_act
    }

    pub fn output_act(&self) -> NonLinearity {
        self.output_act
    }

    pub fn weight_input(&self) -> &NumericGrid {
        &self.weight_input
    }

    pub fn weight_output(&self) -> &NumericGrid {
        &self.weight_output
    }

    pub fn momentum_input(&self) -> &NumericGrid {
        &self.momentum_input
    }

    pub fn momentum_output(&self) -> &NumericGrid {
        &self.momentum_output
    }

    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - Exactly `input_size` values, the bias unit is handled internally.
    ///
    /// # Returns
    /// A view of the output activations, overwritten by the next forward pass. Nothing is
    /// mutated when the input has the wrong length.
    pub fn forward(&mut self, x: ArrayView1<f32>) -> Result<ArrayView1<'_, f32>> {
        if x.len() != self.input_size {
            return Err(MindErr::SizeMismatch {
                what: "inputs",
                got: x.len(),
                expected: self.input_size,
            });
        }

        let Scratch {
            input,
            hidden,
            output,
        } = &mut self.scratch;

        input.view_mut().slice_mut(s![..self.input_size]).assign(&x);

        let hidden_act = self.hidden_act;
        let sums = self.weight_input.view().t().dot(&input.view());
        Zip::from(hidden.view_mut())
            .and(&sums)
            .for_each(|a, &z| *a = hidden_act.activate(z));

        let output_act = self.output_act;
        let sums = self.weight_output.view().t().dot(&hidden.view());
        Zip::from(output.view_mut())
            .and(&sums)
            .for_each(|a, &z| *a = output_act.activate(z));

        Ok(self.scratch.output.view())
    }

    /// Makes a forward pass and copies the outputs out of the network.
    pub fn predict(&mut self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        Ok(self.forward(x)?.to_owned())
    }

    /// Backpropagates the error of the last forward pass and updates the weights.
    ///
    /// Must follow a forward pass over the sample `targets` belongs to.
    ///
    /// # Arguments
    /// * `targets` - Exactly `output_size` expected values.
    /// * `hyper` - The learning rate and momentum coefficient.
    ///
    /// # Returns
    /// The sample's loss, `0.5 * Σ (t - y)²`, measured before the weights change. Nothing is
    /// mutated when the targets have the wrong length.
    pub fn backprop(&mut self, targets: ArrayView1<f32>, hyper: Hyperparams) -> Result<f32> {
        if targets.len() != self.output_size {
            return Err(MindErr::SizeMismatch {
                what: "targets",
                got: targets.len(),
                expected: self.output_size,
            });
        }

        let output_act = self.output_act;
        let hidden_act = self.hidden_act;
        let Scratch {
            input,
            hidden,
            output,
        } = &self.scratch;

        let error = &targets - &output.view();
        let mut delta_output = error.clone();
        Zip::from(&mut delta_output)
            .and(output.view())
            .for_each(|d, &y| *d *= output_act.activate_derivative(y));

        // both deltas are taken from the weights as they were during the forward pass
        let mut delta_hidden = self.weight_output.view().dot(&delta_output);
        Zip::from(&mut delta_hidden)
            .and(hidden.view())
            .for_each(|d, &h| *d *= hidden_act.activate_derivative(h));

        update_layer(
            "output",
            &mut self.weight_output,
            &mut self.momentum_output,
            hidden.view(),
            delta_output.view(),
            hyper,
        );
        update_layer(
            "input",
            &mut self.weight_input,
            &mut self.momentum_input,
            input.view(),
            delta_hidden.view(),
            hyper,
        );

        Ok(0.5 * error.mapv(|e| e * e).sum())
    }

    /// Trains the network over `samples`, in order, `iterations` times.
    ///
    /// Each iteration's total loss is logged at debug level.
    pub fn train(
        &mut self,
        samples: &[TrainingSample],
        iterations: usize,
        hyper: Hyperparams,
    ) -> Result<()> {
        self.train_with(samples, iterations, hyper, |iteration, loss| {
            debug!(iteration = iteration, loss = loss; "training iteration finished");
        })
    }

    /// Trains the network over `samples`, in order, `iterations` times.
    ///
    /// There is no shuffling, batching nor early stopping: every iteration is a full pass.
    ///
    /// # Arguments
    /// * `samples` - The samples to train with.
    /// * `iterations` - The amount of full passes over `samples`.
    /// * `hyper` - The learning rate and momentum coefficient.
    /// * `on_iteration` - Receives each iteration's index and total loss.
    ///
    /// # Returns
    /// An error before any training happens if a sample does not fit the network.
    pub fn train_with<F>(
        &mut self,
        samples: &[TrainingSample],
        iterations: usize,
        hyper: Hyperparams,
        mut on_iteration: F,
    ) -> Result<()>
    where
        F: FnMut(usize, f32),
    {
        self.check_samples(samples)?;

        for iteration in 0..iterations {
            let mut loss = 0.0;
            for sample in samples {
                self.forward(sample.inputs())?;
                loss += self.backprop(sample.expected(), hyper)?;
            }

            on_iteration(iteration, loss);
        }

        Ok(())
    }

    /// Returns the total loss over `samples` without touching the weights.
    pub fn evaluate(&mut self, samples: &[TrainingSample]) -> Result<f32> {
        self.check_samples(samples)?;

        let mut loss = 0.0;
        for sample in samples {
            let y = self.forward(sample.inputs())?;
            let error = &sample.expected() - &y;
            loss += 0.5 * error.mapv(|e| e * e).sum();
        }

        Ok(loss)
    }

    fn check_samples(&self, samples: &[TrainingSample]) -> Result<()> {
        for sample in samples {
            if sample.inputs().len() != self.input_size {
                return Err(MindErr::SizeMismatch {
                    what: "sample inputs",
                    got: sample.inputs().len(),
                    expected: self.input_size,
                });
            }
            if sample.expected().len() != self.output_size {
                return Err(MindErr::SizeMismatch {
                    what: "sample outputs",
                    got: sample.expected().len(),
                    expected: self.output_size,
                });
            }
        }

        Ok(())
    }
}

/// Applies `w += lr * change + mu * previous_change` to every cell of a layer, where
/// `change = deltas[column] * activations[row]`, and remembers `change` for the next call.
fn update_layer(
    layer: &'static str,
    weights: &mut NumericGrid,
    momentum: &mut NumericGrid,
    activations: ArrayView1<f32>,
    deltas: ArrayView1<f32>,
    hyper: Hyperparams,
) {
    let Hyperparams {
        learning_rate,
        momentum: mu,
    } = hyper;
    let tracing = log_enabled!(Level::Trace);

    Zip::indexed(weights.view_mut())
        .and(momentum.view_mut())
        .for_each(|(row, column), w, m| {
            let change = deltas[column] * activations[row];
            *w += learning_rate * change + mu * *m;
            *m = change;

            if tracing {
                trace!(
                    layer = layer,
                    row = row,
                    column = column,
                    change = change,
                    weight = *w;
                    "weight updated"
                );
            }
        });
}
