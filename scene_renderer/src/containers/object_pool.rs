/// Index into an [`ObjectPool`].
///
/// Carries the generation of the slot it was issued for, so an index kept
/// around after its object was released never resolves to a newer object
/// that reused the same slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectPoolIndex {
    slot: usize,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    object: Option<T>,
}

pub struct ObjectPool<T> {
    slots: Vec<Slot<T>>,
    free_slots: Vec<usize>,
    len: usize,
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectPool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
            len: 0,
        }
    }

    pub fn create_object(&mut self, object: T) -> ObjectPoolIndex {
        self.len += 1;

        if let Some(slot) = self.free_slots.pop() {
            let entry = &mut self.slots[slot];
            entry.object = Some(object);

            ObjectPoolIndex {
                slot,
                generation: entry.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                object: Some(object),
            });

            ObjectPoolIndex {
                slot: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    pub fn release_object(&mut self, index: ObjectPoolIndex) -> Option<T> {
        let entry = self.slots.get_mut(index.slot)?;
        if entry.generation != index.generation {
            return None;
        }

        let object = entry.object.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_slots.push(index.slot);
        self.len -= 1;

        Some(object)
    }

    pub fn get_ref(&self, index: ObjectPoolIndex) -> Option<&T> {
        self.slots
            .get(index.slot)
            .filter(|entry| entry.generation == index.generation)
            .and_then(|entry| entry.object.as_ref())
    }

    pub fn get_mut(&mut self, index: ObjectPoolIndex) -> Option<&mut T> {
        self.slots
            .get_mut(index.slot)
            .filter(|entry| entry.generation == index.generation)
            .and_then(|entry| entry.object.as_mut())
    }

    pub fn contains(&self, index: ObjectPoolIndex) -> bool {
        self.get_ref(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectPoolIndex, &T)> {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.object.as_ref().map(|object| {
                (
                    ObjectPoolIndex {
                        slot,
                        generation: entry.generation,
                    },
                    object,
                )
            })
        })
    }
}
