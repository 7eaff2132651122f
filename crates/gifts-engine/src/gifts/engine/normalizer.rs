use crate::gifts::bank::{CORE_QUESTION_COUNT, LIKERT_MAX, LIKERT_MIN};

use super::error::{EngineError, InvalidInputError};

/// Center a full core response vector on the respondent's own mean.
///
/// Removes acquiescence bias (some respondents rate everything 4–5) so gift scores compare
/// relative emphasis rather than overall temperament. The output always sums to zero within
/// floating-point tolerance.
pub fn center_responses(responses: &[i32]) -> Result<Vec<f64>, EngineError> {
    validate_likert("core responses", responses, CORE_QUESTION_COUNT)?;

    let total: i32 = responses.iter().sum();
    let mean = f64::from(total) / responses.len() as f64;

    Ok(responses
        .iter()
        .map(|&response| f64::from(response) - mean)
        .collect())
}

pub(crate) fn validate_likert(
    what: &'static str,
    values: &[i32],
    expected: usize,
) -> Result<(), InvalidInputError> {
    if values.len() != expected {
        return Err(InvalidInputError::WrongLength {
            what,
            expected,
            actual: values.len(),
        });
    }

    match values
        .iter()
        .enumerate()
        .find(|(_, value)| !(LIKERT_MIN..=LIKERT_MAX).contains(*value))
    {
        Some((index, &value)) => Err(InvalidInputError::OutOfRange { what, index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_vector_sums_to_zero() {
        let responses: Vec<i32> = (0..50).map(|i| (i % 5) as i32 + 1).collect();
        let centered = center_responses(&responses).expect("valid responses");
        let sum: f64 = centered.iter().sum();
        assert!(sum.abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn uniform_answers_center_to_exact_zero() {
        let centered = center_responses(&[5; 50]).expect("valid responses");
        assert!(centered.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn rejects_short_vectors() {
        match center_responses(&[3; 49]) {
            Err(EngineError::InvalidInput(InvalidInputError::WrongLength {
                expected: 50,
                actual: 49,
                ..
            })) => {}
            other => panic!("expected wrong length, got {other:?}"),
        }
    }

    #[test]
    fn reports_first_out_of_range_answer() {
        let mut responses = vec![3; 50];
        responses[7] = 6;
        responses[9] = 0;
        match center_responses(&responses) {
            Err(EngineError::InvalidInput(InvalidInputError::OutOfRange {
                index: 7, value: 6, ..
            })) => {}
            other => panic!("expected out of range, got {other:?}"),
        }
    }
}
