use umapper_core::Mappable;

use crate::instantiate::instantiate;
use crate::matcher::match_fields;
use crate::peek::Peek;
use crate::{InternalCause, MapperError};

/// Maps a source instance onto a new instance of the target type.
///
/// Every target field that shares a name with a source field (searching
/// both ancestor chains, most-derived level first) receives a copy of the
/// source's current value; unmatched nullable parameters are left empty and
/// unmatched non-nullable ones fail the mapping. See [`instantiate`] for
/// the no-match fallback.
///
/// The call is pure and synchronous: either a fully constructed instance is
/// returned, or an error, never a partial result.
///
/// ```
/// use umapper::{map, Mappable};
///
/// #[derive(Mappable)]
/// struct UserRow {
///     id: u64,
///     email: String,
///     password_hash: String,
/// }
///
/// #[derive(Mappable)]
/// struct UserDto {
///     id: u64,
///     email: String,
///     bio: Option<String>,
/// }
///
/// let row = UserRow {
///     id: 7,
///     email: "who@example.org".into(),
///     password_hash: "…".into(),
/// };
/// let dto: UserDto = map(&row)?;
/// assert_eq!(dto.id, 7);
/// assert!(dto.bio.is_none());
/// # Ok::<(), umapper::MapperError>(())
/// ```
pub fn map<Src, Dst>(source: &Src) -> Result<Dst, MapperError>
where
    Src: Mappable,
    Dst: Mappable,
{
    let source = Peek::new(source);

    #[cfg(feature = "log")]
    log::trace!("mapping {} -> {}", source.shape(), Dst::SHAPE);

    let values = match_fields(source, Dst::SHAPE)?;
    let instance = instantiate(Dst::SHAPE, &values)?;
    instance
        .downcast::<Dst>()
        .map(|boxed| *boxed)
        .map_err(|_| MapperError::Internal {
            shape: Dst::SHAPE,
            cause: InternalCause::WrongResultType {
                expected: Dst::SHAPE.type_name,
            },
        })
}
