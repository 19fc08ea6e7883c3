use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::method::{is_valid_parameter_list, CustomMethod, ReturnType};
use crate::scaffold::validator::NameValidator;

/// Asks for extra repository methods until the user answers `no`
pub struct CustomMethodCollector;

impl CustomMethodCollector {
    /// Run the collection loop
    ///
    /// # Errors
    ///
    /// Fails only when the prompter cannot provide an answer.
    pub fn collect(prompter: &mut dyn Prompter) -> Result<Vec<CustomMethod>> {
        let mut methods = Vec::new();
        let return_types = ReturnType::keywords();

        loop {
            let answer = prompter.input("Add a custom repository method? (yes/no)")?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "no" => break,
                "yes" => {}
                _ => {
                    prompter.invalid("Please answer yes or no.");
                    continue;
                }
            }

            let name = Self::ask_name(prompter)?;
            let return_type =
                super::pick(prompter, "Return type", &ReturnType::ALL, &return_types, 0)?;
            let params = Self::ask_params(prompter)?;
            let implement_in_service =
                prompter.confirm("Implement this method in the service?", true)?;

            tracing::debug!(method = %name, return_type = %return_type, "custom method collected");
            methods.push(CustomMethod::new(name, return_type, params, implement_in_service));
        }

        Ok(methods)
    }

    fn ask_name(prompter: &mut dyn Prompter) -> Result<String> {
        loop {
            let answer = prompter.input("Method name")?;
            let name = answer.trim();
            match NameValidator::method(name) {
                Ok(()) => return Ok(name.to_string()),
                Err(err) => prompter.invalid(&err.to_string()),
            }
        }
    }

    fn ask_params(prompter: &mut dyn Prompter) -> Result<String> {
        loop {
            let answer = prompter.input("Parameters (e.g. string $email, int $id; empty for none)")?;
            let params = answer.trim();
            if is_valid_parameter_list(params) {
                return Ok(params.to_string());
            }
            prompter.invalid(&format!("'{params}' is not a valid parameter list."));
            if prompter.confirm("Leave them empty?", true)? {
                return Ok(String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    #[test]
    fn test_no_methods() {
        let mut prompter = ScriptedPrompter::new().text("No");
        assert!(CustomMethodCollector::collect(&mut prompter).unwrap().is_empty());
    }

    #[test]
    fn test_collects_method() {
        let mut prompter = ScriptedPrompter::new()
            .text("yes")
            .text("findByEmail")
            .pick("Model")
            .text("string $email")
            .no()
            .text("no");

        let methods = CustomMethodCollector::collect(&mut prompter).unwrap();
        assert_eq!(
            methods,
            vec![CustomMethod::new("findByEmail", ReturnType::Model, "string $email", false)]
        );
    }

    #[test]
    fn test_reprompts_on_bad_answers() {
        let mut prompter = ScriptedPrompter::new()
            .text("maybe")
            .text("YES")
            .text("2fast")
            .text("latest")
            .accept_default()
            .text("email")
            .no()
            .text("int $limit")
            .accept_default()
            .text("no");

        let methods = CustomMethodCollector::collect(&mut prompter).unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].return_type, ReturnType::Mixed);
        assert_eq!(methods[0].params, "int $limit");
        assert!(methods[0].implement_in_service);
        assert_eq!(prompter.rejections().len(), 3);
    }

    #[test]
    fn test_invalid_params_can_be_left_empty() {
        let mut prompter = ScriptedPrompter::new()
            .text("yes")
            .text("purge")
            .pick("void")
            .text("everything")
            .yes()
            .yes()
            .text("no");

        let methods = CustomMethodCollector::collect(&mut prompter).unwrap();
        assert_eq!(methods[0].params, "");
        assert_eq!(methods[0].signature(), "public function purge(): void");
    }
}
