use inquire::{InquireError, Select};
use kivar_core::{SelectError, Selection, VariantCatalog, VariantSelector};

/// Interactive variant picker over the naturally sorted catalog.
pub struct PromptSelector;

impl VariantSelector for PromptSelector {
    fn select(&mut self, catalog: &VariantCatalog) -> Result<Selection, SelectError> {
        if catalog.is_empty() {
            return Err(SelectError::EmptyCatalog);
        }

        match Select::new("Select variant:", catalog.sorted_names())
            .with_page_size(15)
            .prompt()
        {
            Ok(name) => Ok(Selection::Chosen(name)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Selection::Cancelled)
            }
            Err(e) => Err(SelectError::Prompt(e.to_string())),
        }
    }
}
