//! The result-comparison engine.
//!
//! All stages that executed for a sample must agree bit-for-bit. The
//! reference result set is the one whose stage name sorts lexicographically
//! first, a deterministic choice independent of execution order. Value
//! equality is the sign-agnostic relation of [`xcheck_value`]: the IR tools
//! and the hardware simulator produce unsigned values while the source
//! interpreter can produce signed ones, so signedness tags are ignored.

use crate::error::MiscompareError;
use std::collections::BTreeMap;
use xcheck_sample::ArgsBatch;
use xcheck_value::Value;

/// Per-channel result sequences of one proc-mode stage.
pub type ChannelValues = BTreeMap<String, Vec<Value>>;

/// Checks that every function-mode stage produced the same value sequence.
///
/// `results` holds one `(stage name, values)` entry per executed stage, in
/// execution order; comparison order is lexicographic by stage name. The
/// optional `args_batch` is used only to render diagnostics.
///
/// On the first mismatching index, every stage (not just the two being
/// compared) is partitioned by whether its value there matches the
/// reference's or the candidate's; a stage agreeing with neither appears in
/// neither group. This helps identify which of the two values is likely
/// correct.
///
/// # Panics
///
/// Panics if `args_batch` is supplied and its length differs from the first
/// stage's sequence length. That is an internal consistency violation in the
/// orchestrator, not a property of the sample.
pub fn compare_results_function(
    results: &[(String, Vec<Value>)],
    args_batch: Option<&ArgsBatch>,
) -> Result<(), MiscompareError> {
    if results.is_empty() {
        return Ok(());
    }
    if let Some(batch) = args_batch {
        assert_eq!(
            results[0].1.len(),
            batch.len(),
            "stage result count must equal the args batch length"
        );
    }

    let by_name: BTreeMap<&str, &[Value]> = results
        .iter()
        .map(|(name, values)| (name.as_str(), values.as_slice()))
        .collect();
    let mut stages = by_name.iter();
    let Some((&reference, &reference_values)) = stages.next() else {
        return Ok(());
    };

    for (&name, &values) in stages {
        if reference_values.len() != values.len() {
            return Err(MiscompareError::LengthMismatch {
                reference: reference.to_string(),
                reference_len: reference_values.len(),
                name: name.to_string(),
                len: values.len(),
            });
        }
        for (i, value) in values.iter().enumerate() {
            let reference_value = &reference_values[i];
            if reference_value == value {
                continue;
            }
            // Bin all stages by which of the two conflicting values they
            // agree with. BTreeMap iteration keeps the groups sorted.
            let matches_of = |wanted: &Value| -> Vec<String> {
                by_name
                    .iter()
                    .filter(|(_, vs)| vs.get(i) == Some(wanted))
                    .map(|(n, _)| n.to_string())
                    .collect()
            };
            let args = match args_batch {
                Some(batch) => batch[i]
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
                None => "(args unknown)".to_string(),
            };
            return Err(MiscompareError::ValueMismatch {
                index: i,
                args,
                reference_matches: matches_of(reference_value),
                reference_value: reference_value.to_string(),
                candidate_matches: matches_of(value),
                candidate_value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Checks that every proc-mode stage produced the same per-channel
/// sequences.
///
/// The reference is again the lexicographically first stage name. Unlike
/// function mode, the first mismatch anywhere fails immediately with a
/// single-pair diagnostic; there is no multi-way partitioning.
pub fn compare_results_proc(
    results: &[(String, ChannelValues)],
) -> Result<(), MiscompareError> {
    if results.is_empty() {
        return Ok(());
    }

    let by_name: BTreeMap<&str, &ChannelValues> = results
        .iter()
        .map(|(name, channels)| (name.as_str(), channels))
        .collect();
    let mut stages = by_name.iter();
    let Some((&reference, &reference_channels)) = stages.next() else {
        return Ok(());
    };

    for (&name, &channels) in stages {
        if reference_channels.len() != channels.len() {
            return Err(MiscompareError::ChannelCountMismatch {
                reference: reference.to_string(),
                reference_count: reference_channels.len(),
                name: name.to_string(),
                count: channels.len(),
                reference_names: reference_channels.keys().cloned().collect(),
                names: channels.keys().cloned().collect(),
            });
        }
        for (channel, reference_values) in reference_channels {
            let Some(values) = channels.get(channel) else {
                return Err(MiscompareError::MissingChannel {
                    channel: channel.clone(),
                    reference: reference.to_string(),
                    name: name.to_string(),
                });
            };
            if reference_values.len() != values.len() {
                return Err(MiscompareError::ChannelLengthMismatch {
                    reference: reference.to_string(),
                    name: name.to_string(),
                    channel: channel.clone(),
                    reference_len: reference_values.len(),
                    len: values.len(),
                });
            }
            for (i, (reference_value, value)) in
                reference_values.iter().zip(values).enumerate()
            {
                if reference_value != value {
                    return Err(MiscompareError::ChannelValueMismatch {
                        reference: reference.to_string(),
                        name: name.to_string(),
                        channel: channel.clone(),
                        index: i,
                        reference_value: reference_value.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
