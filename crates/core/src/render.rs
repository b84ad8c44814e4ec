use crate::card::CompanyCard;
use crate::company::CompanyRecord;

/// Shown in place of the list when bootstrap fails outside the retrieval layer.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load companies";

/// Something cards can be drawn into: a DOM element, a terminal board.
///
/// A container owns its cards exclusively. `clear` must drop every card and
/// handler from the previous pass.
pub trait CardContainer {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn append_card(&mut self, card: CompanyCard) -> Result<(), Self::Error>;
}

/// Replaces the container's contents with one card per company, in input order.
pub fn render_companies<C>(container: &mut C, companies: &[CompanyRecord]) -> Result<(), C::Error>
where
    C: CardContainer + ?Sized,
{
    container.clear()?;
    for company in companies {
        container.append_card(CompanyCard::from_record(company))?;
    }
    Ok(())
}
