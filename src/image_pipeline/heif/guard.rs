use std::mem::ManuallyDrop;
use std::ops::Deref;

/// Owns one native codec object and hands it back to its backend on drop.
pub struct NativeGuard<'b, B: ?Sized, T> {
    backend: &'b B,
    resource: ManuallyDrop<T>,
    release: fn(&B, T),
}

impl<'b, B: ?Sized, T> NativeGuard<'b, B, T> {
    pub fn new(backend: &'b B, resource: T, release: fn(&B, T)) -> Self {
        Self {
            backend,
            resource: ManuallyDrop::new(resource),
            release,
        }
    }
}

impl<B: ?Sized, T> Deref for NativeGuard<'_, B, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<B: ?Sized, T> Drop for NativeGuard<'_, B, T> {
    fn drop(&mut self) {
        // SAFETY: `resource` is only taken here and drop runs once.
        let resource = unsafe { ManuallyDrop::take(&mut self.resource) };
        (self.release)(self.backend, resource);
    }
}
