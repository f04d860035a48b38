use super::stage::ShaderStage;

/// Fixed-capacity map from [`ShaderStage`] to a compiled shader handle.
///
/// Holds at most one handle per stage. The table never talks to the
/// driver; callers get displaced handles back and decide how to free them.
#[derive(Debug)]
pub struct StageTable<S> {
    slots: [Option<S>; ShaderStage::COUNT],
}

impl<S: Copy> StageTable<S> {
    pub fn new() -> Self {
        Self {
            slots: [None; ShaderStage::COUNT],
        }
    }

    pub fn get(&self, stage: ShaderStage) -> Option<S> {
        self.slots[stage.index()]
    }

    /// Store `shader` for `stage`, returning the handle it displaced.
    pub fn replace(&mut self, stage: ShaderStage, shader: S) -> Option<S> {
        self.slots[stage.index()].replace(shader)
    }

    /// Occupied slots in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (ShaderStage, S)> + '_ {
        ShaderStage::ALL
            .into_iter()
            .filter_map(move |stage| self.get(stage).map(|shader| (stage, shader)))
    }

    /// Empty every slot, yielding the handles that were stored.
    pub fn take_all(&mut self) -> Vec<(ShaderStage, S)> {
        let taken = self.iter().collect();
        self.slots = [None; ShaderStage::COUNT];
        taken
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Copy> Default for StageTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_returns_displaced_handle() {
        let mut table = StageTable::new();
        assert_eq!(table.replace(ShaderStage::Vertex, 1u32), None);
        assert_eq!(table.replace(ShaderStage::Vertex, 2), Some(1));
        assert_eq!(table.get(ShaderStage::Vertex), Some(2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn iter_follows_pipeline_order() {
        let mut table = StageTable::new();
        table.replace(ShaderStage::Fragment, 5u32);
        table.replace(ShaderStage::Vertex, 1);
        table.replace(ShaderStage::Geometry, 4);

        let stages: Vec<_> = table.iter().map(|(stage, _)| stage).collect();
        assert_eq!(
            stages,
            vec![ShaderStage::Vertex, ShaderStage::Geometry, ShaderStage::Fragment]
        );
    }

    #[test]
    fn take_all_clears_slots() {
        let mut table = StageTable::new();
        table.replace(ShaderStage::Vertex, 1u32);
        table.replace(ShaderStage::Fragment, 2);

        let taken = table.take_all();
        assert_eq!(taken, vec![(ShaderStage::Vertex, 1), (ShaderStage::Fragment, 2)]);
        assert!(table.is_empty());
        assert_eq!(table.get(ShaderStage::Vertex), None);
    }
}
