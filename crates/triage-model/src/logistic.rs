//! Multinomial logistic regression over sparse TF-IDF features.
//!
//! Fitted by full-batch gradient descent on the mean cross-entropy plus an
//! L2 penalty of `||W||^2 / (2 * C * n)`. Intercepts are not penalized.
//! With a single class the model is constant and fitting is skipped.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tfidf::SparseVector;

/// Optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub max_iter: usize,
    pub learning_rate: f64,
    /// Inverse regularization strength.
    pub c: f64,
    /// Stop once the largest gradient component falls below this.
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.5,
            c: 1.0,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticRegression {
    /// Sorted class labels.
    pub classes: Vec<String>,
    /// One row of feature weights per class.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl LogisticRegression {
    /// Fit on vectorized rows and their labels.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyDataset` for no rows and
    /// `ModelError::LengthMismatch` if rows and labels differ in count.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[&str],
        n_features: usize,
        options: &FitOptions,
    ) -> Result<Self, ModelError> {
        if rows.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                texts: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let mut classes: Vec<String> = labels.iter().map(|l| (*l).to_string()).collect();
        classes.sort_unstable();
        classes.dedup();

        let n_classes = classes.len();
        let mut model = Self {
            coefficients: vec![vec![0.0; n_features]; n_classes],
            intercepts: vec![0.0; n_classes],
            classes,
            iterations: 0,
            converged: false,
        };

        if n_classes == 1 {
            model.converged = true;
            return Ok(model);
        }

        let targets: Vec<usize> = labels
            .iter()
            .filter_map(|label| model.classes.binary_search_by(|c| c.as_str().cmp(label)).ok())
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        let penalty = 1.0 / (options.c * n);

        for iteration in 1..=options.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (row, &target) in rows.iter().zip(&targets) {
                let probabilities = model.probabilities(row);
                for (k, p) in probabilities.iter().enumerate() {
                    let residual = p - if k == target { 1.0 } else { 0.0 };
                    grad_b[k] += residual / n;
                    for &(j, x) in row {
                        grad_w[k][j] += residual * x / n;
                    }
                }
            }

            let mut largest = 0.0_f64;
            for k in 0..n_classes {
                for j in 0..n_features {
                    let g = grad_w[k][j] + penalty * model.coefficients[k][j];
                    largest = largest.max(g.abs());
                    model.coefficients[k][j] -= options.learning_rate * g;
                }
                largest = largest.max(grad_b[k].abs());
                model.intercepts[k] -= options.learning_rate * grad_b[k];
            }

            model.iterations = iteration;
            if largest < options.tolerance {
                model.converged = true;
                break;
            }
        }

        if !model.converged {
            tracing::debug!(
                iterations = model.iterations,
                "logistic regression stopped before converging"
            );
        }
        Ok(model)
    }

    /// Softmax class probabilities, ordered like `classes`.
    #[must_use]
    pub fn probabilities(&self, row: &SparseVector) -> Vec<f64> {
        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, intercept)| {
                intercept
                    + row
                        .iter()
                        .filter_map(|&(j, x)| weights.get(j).map(|w| w * x))
                        .sum::<f64>()
            })
            .collect();

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }

    /// Most probable class. Ties go to the first class in sorted order.
    #[must_use]
    pub fn predict(&self, row: &SparseVector) -> Option<&str> {
        let probabilities = self.probabilities(row);
        let mut best: Option<(usize, f64)> = None;
        for (k, p) in probabilities.into_iter().enumerate() {
            if best.is_none_or(|(_, top)| p > top) {
                best = Some((k, p));
            }
        }
        best.and_then(|(k, _)| self.classes.get(k).map(String::as_str))
    }
}
