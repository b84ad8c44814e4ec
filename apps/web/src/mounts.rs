/// A container tied to one root element of the page.
pub trait Mounted {
    type Root: PartialEq;

    fn root(&self) -> &Self::Root;

    /// Whether the root is still part of the document.
    fn is_attached(&self) -> bool;
}

/// Containers mounted on the page, at most one per root.
pub struct Mounts<C> {
    containers: Vec<C>,
}

impl<C: Mounted> Mounts<C> {
    pub const fn new() -> Self {
        Self {
            containers: Vec::new(),
        }
    }

    /// Drops containers whose root left the document, then returns the one for
    /// `root`, creating it if needed.
    pub fn get_or_insert<E>(
        &mut self,
        root: &C::Root,
        create: impl FnOnce() -> Result<C, E>,
    ) -> Result<&mut C, E> {
        self.containers
            .retain(|container| container.is_attached() || container.root() == root);

        let index = match self
            .containers
            .iter()
            .position(|container| container.root() == root)
        {
            Some(index) => index,
            None => {
                self.containers.push(create()?);
                self.containers.len() - 1
            }
        };

        Ok(&mut self.containers[index])
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.containers.len()
    }
}
