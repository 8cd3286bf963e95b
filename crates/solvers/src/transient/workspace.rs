use march_core::State;

/// Returns the workspace state in `slot`, (re)allocating it to match `like`.
///
/// A fresh or resized workspace is a clone of `like`; callers overwrite its
/// contents before reading them.
pub(super) fn shaped<'a, U: State>(slot: &'a mut Option<U>, like: &U) -> &'a mut U {
    if !matches!(slot, Some(existing) if existing.dofs() == like.dofs()) {
        *slot = Some(like.clone());
    }
    slot.get_or_insert_with(|| like.clone())
}
