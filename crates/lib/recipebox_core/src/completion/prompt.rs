//! Prompt text sent to the completion API.

/// System message fixing the assistant's role and output format.
pub const SYSTEM_PROMPT: &str = "あなたはプロの料理人です。必ずJSONオブジェクトのみで回答してください。";

/// Keys the model is told to return, in order.
pub const RECIPE_KEYS: [&str; 3] = ["recipe_name", "ingredients", "instructions"];

/// Build the user prompt for an ingredient list.
pub fn recipe_prompt(ingredients: &str) -> String {
    format!(
        "以下の食材を使った家庭料理のレシピを1つ考えてください。\n\
         食材: {ingredients}\n\
         \n\
         回答は次の3つのキーだけを持つJSONオブジェクトにしてください。\n\
         - \"{name}\": 料理名(文字列)\n\
         - \"{ingr}\": 材料と分量(文字列)\n\
         - \"{inst}\": 作り方の手順(文字列)\n\
         JSON以外の文章は含めないでください。",
        name = RECIPE_KEYS[0],
        ingr = RECIPE_KEYS[1],
        inst = RECIPE_KEYS[2],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_ingredients_and_keys() {
        let p = recipe_prompt("豆腐, ねぎ");
        assert!(p.contains("食材: 豆腐, ねぎ"));
        for key in RECIPE_KEYS {
            assert!(p.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }
}
