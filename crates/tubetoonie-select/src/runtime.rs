//! Interaction loops.
//!
//! [`run`] drives a [`Picker`] to a terminal state through a [`Driver`]:
//! render once, then read a key, apply it, and redraw until the picker
//! confirms or cancels. [`Driver::finish`] runs exactly once, whatever the
//! outcome.

use std::fmt::Display;

use crate::{Driver, Picker, PickerAction, PickerState};

/// Drive `picker` until it confirms or cancels.
///
/// # Errors
///
/// Returns the first driver error. `finish` still runs; if it fails as well
/// its error is logged and the original error returned.
pub fn run<D>(driver: &mut D, picker: &mut Picker) -> Result<PickerState, D::Error>
where
    D: Driver + ?Sized,
{
    let outcome = drive(driver, picker);
    let finished = driver.finish();

    match (outcome, finished) {
        (Ok(state), Ok(())) => Ok(state),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(finish_err)) => {
            tracing::warn!(error = %finish_err, "failed to finish picker surface");
            Err(e)
        },
    }
}

fn drive<D>(driver: &mut D, picker: &mut Picker) -> Result<PickerState, D::Error>
where
    D: Driver + ?Sized,
{
    driver.render(picker)?;
    loop {
        let key = driver.read_key()?;
        match picker.handle(key) {
            PickerAction::Render => driver.render(picker)?,
            PickerAction::Confirm | PickerAction::Cancel => return Ok(picker.state()),
        }
    }
}

/// Let the user pick one of `options`.
///
/// Returns `None` when cancelled, when input ends, or when `options` is
/// empty (the driver is not touched then). `default_index` is clamped.
pub fn select_one<'a, D, T>(
    driver: &mut D,
    prompt: &str,
    options: &'a [T],
    default_index: usize,
) -> Result<Option<&'a T>, D::Error>
where
    D: Driver + ?Sized,
    T: Display,
{
    let Some(mut picker) = Picker::single(prompt, labels(options), default_index) else {
        return Ok(None);
    };

    match run(driver, &mut picker)? {
        PickerState::Confirmed => Ok(options.get(picker.cursor())),
        PickerState::Cancelled | PickerState::Active => Ok(None),
    }
}

/// Let the user choose any subset of `options`.
///
/// On confirm, returns the chosen options in list order; an empty vector
/// means the user confirmed without choosing anything. Returns `None` when
/// cancelled, when input ends, or when `options` is empty.
pub fn select_many<'a, D, T>(
    driver: &mut D,
    prompt: &str,
    options: &'a [T],
) -> Result<Option<Vec<&'a T>>, D::Error>
where
    D: Driver + ?Sized,
    T: Display,
{
    let Some(mut picker) = Picker::multi(prompt, labels(options)) else {
        return Ok(None);
    };

    match run(driver, &mut picker)? {
        PickerState::Confirmed => {
            Ok(Some(picker.chosen().into_iter().filter_map(|index| options.get(index)).collect()))
        },
        PickerState::Cancelled | PickerState::Active => Ok(None),
    }
}

fn labels<T: Display>(options: &[T]) -> Vec<String> {
    options.iter().map(ToString::to_string).collect()
}
