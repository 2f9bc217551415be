//! Instruction texts sent to the generative backend. The backend is the
//! authority on the response shape; these only ask for it.

pub const CLASSIFICATION_PROMPT: &str = "\
Analyze the following text to identify the document type. Respond ONLY with a JSON object \
containing a single 'document_type' key. Choose from: 'Invoice', 'BalanceSheet', \
'ProfitAndLossStatement', 'Contract', 'GeneralDocument'.
Example: {\"document_type\": \"Invoice\"}";

pub const KEY_POINTS_ANALYSIS_PROMPT: &str = "\
You are an expert document analysis AI. Analyze the following text and respond ONLY with a JSON object.

Extract:
1. document_type: The type of document (e.g., 'Invoice', 'Contract', 'Partnership Agreement', 'BalanceSheet', etc.)
2. summary: A concise 1-2 sentence summary of the document's purpose
3. key_points: Array of 3-5 important points from the document as strings (e.g., \"Effective Date: January 1, 2025\")
4. deadlines: Array of objects with description and date. Each object should have:
   - description: What the deadline is for
   - date: The deadline date in ISO format (YYYY-MM-DD)

Respond ONLY with valid JSON in this exact structure:

{
  \"document_type\": \"Invoice\",
  \"summary\": \"Invoice for office supplies issued to customer.\",
  \"key_points\": [\"Invoice Number: INV-12345\", \"Total Amount: $2,400.00\"],
  \"deadlines\": [{\"description\": \"Payment due date\", \"date\": \"2024-12-15\"}]
}

If no deadlines are found, set deadlines to an empty array [].";

pub const EXTRACTED_DATA_ANALYSIS_PROMPT: &str = "\
You are an expert multilingual document analysis AI. Respond ONLY with a valid JSON object.

1. Detect and include the document's 'language' (e.g., \"English\", \"Dutch\", \"Spanish\").
2. Identify the document's 'document_type' (e.g., \"Invoice\", \"BalanceSheet\", \"Contract\", or \"GeneralDocument\").
3. Provide a brief 'summary' of the document's purpose (1-2 sentences).
4. Extract only explicitly present key-value pairs into an 'extracted_data' object. \
Omit keys that are not present in the document. Do not invent values.

{
  \"language\": \"English\",
  \"document_type\": \"Invoice\",
  \"summary\": \"...\",
  \"extracted_data\": {\"Invoice Number\": \"...\"}
}";

pub const IMAGE_EXTRACTION_PROMPT: &str = "Extract the plain textual content from this image. \
Return ONLY the extracted text with no additional commentary.";

pub const FILE_EXTRACTION_PROMPT: &str = "Extract the plain textual content from the provided file. \
Return ONLY the extracted text with no additional commentary.";
