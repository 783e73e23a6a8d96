use beck_core::{Error, ParameterKey, Result, Row, Value};
use std::mem;

/// Bind state of one statement: one slot per distinct logical parameter,
/// each either bound or unbound, plus the batches sealed so far.
///
/// The slot set is fixed at creation from the rewriter's slot order, which
/// makes the completeness check mechanical: a batch is sealed only when
/// every slot holds a value.
#[derive(Debug)]
pub struct Binder {
    slots: Box<[(ParameterKey, Option<Value>)]>,
    batches: Vec<Row>,
}

impl Binder {
    pub fn new(keys: &[ParameterKey]) -> Self {
        Self {
            slots: keys.iter().map(|key| (key.clone(), None)).collect(),
            batches: Vec::new(),
        }
    }

    /// Sets or overwrites a slot's value, last write wins.
    pub fn bind(&mut self, key: &ParameterKey, value: Value) -> Result<()> {
        let Some(slot) = self.slots.iter_mut().find(|(k, _)| k == key) else {
            let error = Error::UnknownParameter(key.clone());
            log::error!("{error}");
            return Err(error);
        };
        slot.1 = Some(value);
        Ok(())
    }

    /// Seals the current slots into a new batch and resets them all to
    /// unbound. Fails naming every missing key when a slot is unbound.
    pub fn add(&mut self) -> Result<()> {
        let missing = self
            .slots
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            let error = Error::bind_incomplete(missing);
            log::error!("{error}");
            return Err(error);
        }
        let batch = self
            .slots
            .iter_mut()
            // Every slot was verified bound just above.
            .map(|(_, value)| value.take().unwrap_or_default())
            .collect();
        self.batches.push(batch);
        Ok(())
    }

    pub fn has_bound(&self) -> bool {
        self.slots.iter().any(|(_, value)| value.is_some())
    }

    pub fn batches(&self) -> usize {
        self.batches.len()
    }

    /// Finalizes for dispatch. With no sealed batch the current binds form
    /// one implicit batch; dangling binds after the last `add` are sealed
    /// as one more batch, so a partially bound trailing set fails like any
    /// other incomplete `add`.
    pub fn take_batches(&mut self) -> Result<Vec<Row>> {
        if self.batches.is_empty() || self.has_bound() {
            self.add()?;
        }
        Ok(mem::take(&mut self.batches))
    }
}
